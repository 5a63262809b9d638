#[macro_use]
extern crate log;

use bitmaprle::{picture, BitReader, FieldWidth};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Compress,
    Expand,
}

fn parse_mode(arg: &str) -> Result<Mode, String> {
    match arg {
        "-" | "compress" => Ok(Mode::Compress),
        "+" | "expand" => Ok(Mode::Expand),
        other => Err(format!(
            "illegal mode '{other}', use '-' to compress or '+' to expand"
        )),
    }
}

#[derive(Parser)]
#[command(name = "bitmaprle", about = "Run-length compress or expand a bitmap")]
struct Cli {
    /// '-' to compress, '+' to expand
    #[arg(value_parser = parse_mode)]
    mode: Mode,
    /// Bits per run-length field
    #[arg(short, long, default_value_t = 4)]
    width: u32,
    /// Input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also write the uncompressed bits as a PNG picture
    #[arg(long)]
    picture: Option<PathBuf>,
    /// Picture width in pixels
    #[arg(long, default_value_t = 32)]
    cols: u32,
}

fn read_input(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    let mut data = vec![];
    match path {
        Some(path) => File::open(path)?.read_to_end(&mut data)?,
        None => io::stdin().lock().read_to_end(&mut data)?,
    };
    Ok(data)
}

fn write_output(path: Option<&PathBuf>, data: &[u8]) -> io::Result<()> {
    let mut out: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    out.write_all(data)?;
    out.flush()
}

fn run(cli: Cli) -> bitmaprle::Result<()> {
    let width = FieldWidth::new(cli.width)?;
    if cli.picture.is_some() && cli.cols == 0 {
        return Err(bitmaprle::Error::InvalidColumns);
    }
    info!("{:?} with {width}", cli.mode);

    let data = read_input(cli.input.as_ref())?;
    let mut reader = BitReader::new(data.as_slice());
    let mut transformed = vec![];
    match cli.mode {
        Mode::Compress => bitmaprle::compress(&mut reader, &mut transformed, width)?,
        Mode::Expand => bitmaprle::expand(&mut reader, &mut transformed, width)?,
    }
    info!("{} -> {} bits", data.len() * 8, transformed.len() * 8);

    // the picture goes first so a failed save leaves no output behind
    if let Some(path) = &cli.picture {
        let uncompressed = match cli.mode {
            Mode::Compress => &data,
            Mode::Expand => &transformed,
        };
        picture::render_bytes(uncompressed, cli.cols)?.save(path)?;
        info!("picture written to {}", path.display());
    }
    write_output(cli.output.as_ref(), &transformed)?;
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
