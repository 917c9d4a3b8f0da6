//! qrsmith entrypoint

use clap::Parser;
use qrsmith::color::Color;
use qrsmith::config::QrsmithConfig;
use qrsmith::pipeline::{self, GenerateRequest, RunOutcome};
use qrsmith::qr::{EccLevel, MaskChoice, VersionRange};
use qrsmith::{Result, input, logging};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "qrsmith",
    version,
    about = "A command line tool that generates QR codes and outputs them as a PNG file"
)]
struct Cli {
    /// The input text used to generate the QR code; read from stdin if absent
    #[arg(short = 't', long = "text-input", value_name = "INPUT")]
    text_input: Option<String>,

    /// Error correction level: LOW, MEDIUM, QUARTILE, HIGH or L, M, Q, H
    #[arg(short = 'z', long = "error-correction-level", value_name = "LEVEL")]
    error_correction_level: Option<String>,

    /// Force one of the 8 mask patterns; the encoder picks one if absent
    #[arg(short = 'm', long = "mask", value_name = "MASK")]
    mask: Option<u8>,

    /// Increase the error correction level when it fits without growing the code
    #[arg(short = 'a', long = "boost-ecc")]
    boost_ecc: bool,

    /// The max version of the QR code (1-40)
    #[arg(short = 'x', long = "version-max-range", value_name = "NUM", default_value_t = 40)]
    version_max_range: u8,

    /// The min version of the QR code (1-40)
    #[arg(short = 'n', long = "version-min-range", value_name = "NUM", default_value_t = 1)]
    version_min_range: u8,

    /// Foreground color in hex notation: #RRGGBBAA
    #[arg(short = 'f', long = "foreground-color", value_name = "COLOR")]
    foreground_color: Option<String>,

    /// Background color in hex notation: #RRGGBBAA
    #[arg(short = 'b', long = "background-color", value_name = "COLOR")]
    background_color: Option<String>,

    /// Scale of the output image; values below 1.0 are clamped up
    #[arg(short = 's', long = "scale", value_name = "FLOAT")]
    scale: Option<f32>,

    /// Path of the output PNG
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: PathBuf,

    /// Show the image before saving; press 'y' to save, 'n' to cancel
    #[arg(short = 'v', long = "verify")]
    verify: bool,

    /// Only output text if there is an error
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Optional configuration file (toml/yaml). Defaults to qrsmith.{toml,yaml}
    /// in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too; they exit 0, real parse
            // errors exit 1
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = QrsmithConfig::load(cli.config.as_deref())?;
    if cli.quiet {
        config.logging.level = "error".to_string();
    }
    logging::init(&config.logging)?;

    let level = match cli.error_correction_level.as_deref() {
        Some(value) => value.parse::<EccLevel>()?,
        None => EccLevel::default(),
    };
    let versions = VersionRange::new(cli.version_min_range, cli.version_max_range)?;
    let mask = match cli.mask {
        Some(index) => MaskChoice::fixed(index)?,
        None => MaskChoice::Auto,
    };
    let foreground = match cli.foreground_color.as_deref() {
        Some(value) => Color::parse(value)?,
        None => config.render.foreground,
    };
    let background = match cli.background_color.as_deref() {
        Some(value) => Color::parse(value)?,
        None => config.render.background,
    };
    // Shrinking below the native grid is never useful: clamp up to 1.0
    let scale = cli.scale.unwrap_or(config.render.scale).max(1.0);

    let text = match cli.text_input {
        Some(text) => text,
        None => {
            let text = input::read_stdin(input::MAX_TEXT_INPUT)?;
            if !cli.quiet {
                println!();
            }
            text
        }
    };

    let request = GenerateRequest {
        text,
        level,
        versions,
        mask,
        boost_ecc: cli.boost_ecc,
        foreground,
        background,
        scale,
        output: cli.output,
        verify: cli.verify,
    };

    if !cli.quiet {
        println!("Generating QR code with attributes:");
        println!("   Input:       {}", request.text);
        println!("   ECC Level:   {}", request.level);
        println!("   Mask:        {}", request.mask);
        println!("   Version Min: {}", request.versions.min());
        println!("   Version Max: {}", request.versions.max());
        println!("   Boost ECC:   {}", request.boost_ecc);
    }

    let prepared = pipeline::prepare(&request)?;

    if !cli.quiet {
        println!(
            "Generated QR code [{0}x{0}]\n",
            prepared.native_size()
        );
    }

    if request.verify && !cli.quiet {
        println!("Verifying...");
        println!(
            "Press 'y' to save image ({}) then quit, or press 'n' to quit\n",
            request.output.display()
        );
    }

    let output_size = prepared.output_size();
    match pipeline::finish(&config, &request, prepared)? {
        RunOutcome::Saved => {
            if !cli.quiet {
                println!("Generating {} with attributes:", request.output.display());
                println!("   Scale:      {}", request.scale);
                println!("   Size:       {}", output_size);
                println!("   Foreground: {}", request.foreground);
                println!("   Background: {}", request.background);
                println!("Generated {}", request.output.display());
            }
        }
        RunOutcome::Cancelled => {
            if !cli.quiet {
                println!("Cancelled");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_short_flags() {
        let cli = Cli::try_parse_from([
            "qrsmith", "-t", "HELLO", "-z", "q", "-m", "3", "-a", "-n", "2", "-x", "10", "-f",
            "#112233FF", "-b", "#FFFFFF00", "-s", "2.5", "-o", "out.png", "-q",
        ])
        .unwrap();

        assert_eq!(cli.text_input.as_deref(), Some("HELLO"));
        assert_eq!(cli.error_correction_level.as_deref(), Some("q"));
        assert_eq!(cli.mask, Some(3));
        assert!(cli.boost_ecc);
        assert_eq!(cli.version_min_range, 2);
        assert_eq!(cli.version_max_range, 10);
        assert_eq!(cli.scale, Some(2.5));
        assert_eq!(cli.output, PathBuf::from("out.png"));
        assert!(cli.quiet);
        assert!(!cli.verify);
    }

    #[test]
    fn test_output_is_required() {
        assert!(Cli::try_parse_from(["qrsmith", "-t", "HELLO"]).is_err());
    }

    #[test]
    fn test_version_defaults_cover_full_range() {
        let cli = Cli::try_parse_from(["qrsmith", "-o", "out.png"]).unwrap();
        assert_eq!(cli.version_min_range, 1);
        assert_eq!(cli.version_max_range, 40);
    }
}
