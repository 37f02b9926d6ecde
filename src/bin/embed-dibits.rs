use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::ImageReader;
use sprite_blend::dib::{self, Newline};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "embed-dibits")]
#[command(about = "Convert images to premultiplied 32-bit DIB pixel arrays", long_about = None)]
#[command(after_help = "example: embed-dibits box.png wall.png --stdout > sprites.h")]
struct Args {
    /// Images to convert
    #[arg(value_name = "FILEPATH", required = true)]
    filepaths: Vec<PathBuf>,

    /// Use a specific newline mode
    #[arg(long, value_enum, default_value_t = NewlineArg::System)]
    newline: NewlineArg,

    /// Output flavor
    #[arg(long, value_enum, default_value_t = Format::C)]
    format: Format,

    /// Write directly to files (slower, uses less memory)
    #[arg(long)]
    no_buffer: bool,

    /// Do not print file -> target information
    #[arg(long)]
    quiet: bool,

    /// Print code to standard output instead of files
    #[arg(long)]
    stdout: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NewlineArg {
    Dos,
    Mac,
    Unix,
    System,
}

impl From<NewlineArg> for Newline {
    fn from(arg: NewlineArg) -> Self {
        match arg {
            NewlineArg::Dos => Newline::Dos,
            NewlineArg::Mac => Newline::Mac,
            NewlineArg::Unix => Newline::Unix,
            NewlineArg::System => Newline::System,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// C header with a DWORD array
    C,
    /// Rust source with a `pub static` u32 array
    Rust,
    /// Little-endian words, ready for `include_bytes!`
    Raw,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::C => "h",
            Format::Rust => "rs",
            Format::Raw => "dib",
        }
    }
}

fn emit<W: Write>(out: &mut W, format: Format, variable: &str, pixels: &[u32], newline: Newline) -> io::Result<()> {
    match format {
        Format::C => dib::write_c_array(out, variable, pixels, newline),
        Format::Rust => dib::write_rust_array(out, variable, pixels, newline),
        Format::Raw => out.write_all(&dib::to_le_bytes(pixels)),
    }
}

/// Emit into memory first, then hand the whole thing to `out` in one write.
fn emit_buffered<W: Write>(out: &mut W, format: Format, variable: &str, pixels: &[u32], newline: Newline) -> io::Result<()> {
    let mut buffer = Vec::new();
    emit(&mut buffer, format, variable, pixels, newline)?;
    out.write_all(&buffer)
}

/// Decode one image into its array name and premultiplied pixels.
fn load(path: &Path) -> Result<(String, Vec<u32>)> {
    let image = ImageReader::open(path)
        .context("Failed to open image")?
        .decode()
        .context("Failed to decode image")?;
    log::debug!("{}: {}x{}", path.display(), image.width(), image.height());

    let variable = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((variable, dib::encode_image(&image)))
}

/// Where a converted file goes: next to the input, extension swapped.
fn target_path(path: &Path, format: Format) -> PathBuf {
    path.with_extension(format.extension())
}

fn write_converted<W: Write>(out: &mut W, args: &Args, variable: &str, pixels: &[u32]) -> io::Result<()> {
    let newline = Newline::from(args.newline);
    if args.no_buffer {
        emit(out, args.format, variable, pixels, newline)
    } else {
        emit_buffered(out, args.format, variable, pixels, newline)
    }
}

/// Convert one file. With `--stdout` the code goes to `stdout`; otherwise it is
/// written to the target file, `stdout` only gets the `input -> target` line,
/// and the target path is returned.
fn convert<W: Write>(path: &Path, args: &Args, stdout: &mut W) -> Result<Option<PathBuf>> {
    let (variable, pixels) = load(path)?;

    if args.stdout {
        write_converted(stdout, args, &variable, &pixels)?;
        stdout.flush()?;
        return Ok(None);
    }

    let target = target_path(path, args.format);
    if !args.quiet {
        writeln!(stdout, "{} -> {}", path.display(), target.display())?;
    }
    let mut file = File::create(&target)
        .with_context(|| format!("Failed to create {}", target.display()))?;
    write_converted(&mut file, args, &variable, &pixels)?;
    Ok(Some(target))
}

/// Convert every input, reporting failures as they happen. Returns the exit status.
fn run<O: Write, E: Write>(args: &Args, stdout: &mut O, stderr: &mut E) -> u8 {
    let mut status = 0;
    for path in &args.filepaths {
        if let Err(e) = convert(path, args, stdout) {
            // Nothing sensible left to do if stderr itself is gone.
            let _ = writeln!(stderr, "embed-dibits: error: {} - {e:#}", path.display());
            status = 1;
        }
    }
    status
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let status = run(&args, &mut io::stdout().lock(), &mut io::stderr().lock());
    ExitCode::from(status)
}
