use std::error::Error;

use clap::Parser;
use exif_formatter::{Formatter, FormatterConfig, NameLookup, WritePolicy};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// `Name=Value` pairs, e.g. `FNumber=2.8 GPSLatitude=39,54,20`
    pairs: Vec<String>,

    /// Match property names ignoring ASCII case
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// Protect vendor maker-note tags instead of using registry permissions
    #[arg(long)]
    vendor_protected: bool,

    /// List every property with its tag and legal codes
    #[arg(short, long)]
    describe: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = FormatterConfig::accessor();
    if cli.case_insensitive {
        config = config.with_lookup(NameLookup::CaseInsensitive);
    }
    if cli.vendor_protected {
        config = config.with_write_policy(WritePolicy::VendorProtected);
    }
    let formatter = Formatter::with_config(config);

    if cli.describe {
        for p in formatter.registry().properties() {
            let Some(info) = formatter.describe(p.name) else {
                continue;
            };
            println!("{info}");
            for d in info.values {
                println!("    {:<8}{}", d.code, d.description);
            }
        }
    }

    for pair in &cli.pairs {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(format!("expected Name=Value, got {pair:?}").into());
        };
        let line = match formatter.format(name, value) {
            Ok(canonical) => canonical,
            Err(e) => format!("{} ({e})", e.status()),
        };
        println!("{:<32}=> {}", name, line);
    }

    Ok(())
}
