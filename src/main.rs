use std::io::{self, Read, Write};

use c2sim_translate::diag::TracingSink;
use c2sim_translate::report::{parse_report, translate_report};

type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn main() -> Result<(), DynError> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1).collect::<Vec<_>>();
    let dump_fields = if let Some(pos) = args.iter().position(|a| a == "--fields") {
        args.remove(pos);
        true
    } else {
        false
    };

    if args.is_empty() || args.len() > 2 {
        eprintln!("Usage: translate [--fields] <input.xml|-> [output.xml]");
        std::process::exit(2);
    }

    let input = args.remove(0);
    let xml = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&input)?
    };

    let rendered = if dump_fields {
        let parsed = parse_report(&xml, &mut TracingSink);
        serde_json::to_string_pretty(&parsed)?
    } else {
        translate_report(&xml)
    };

    match args.first() {
        Some(path) if path != "-" => std::fs::write(path, rendered)?,
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
