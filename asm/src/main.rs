use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use color_print::cprintln;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "source.asm")]
    input: PathBuf,

    /// Output file (defaults to the input with a `.bin` extension)
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    println!("MOS 6502 Assembler");

    println!("1. Read Source");
    println!("  < {}", args.input.display());
    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            cprintln!(
                "<red,bold>error</>: cannot open {}: {}",
                args.input.display(),
                err
            );
            return ExitCode::FAILURE;
        }
    };

    println!("2. Assemble");
    let assembly = match mosasm::assemble(&source) {
        Ok(assembly) => assembly,
        Err(diag) => {
            diag.print(&args.input.display().to_string());
            return ExitCode::FAILURE;
        }
    };
    println!("  - {} bytes of code", assembly.image.bytes.len());

    if args.dump {
        mosasm::util::print_dump(&assembly.code);
    }

    println!("3. Write Binary");
    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("bin"));
    println!("  > {}", output.display());
    if let Err(err) = std::fs::write(&output, &assembly.image.bytes) {
        cprintln!(
            "<red,bold>error</>: cannot write {}: {}",
            output.display(),
            err
        );
        return ExitCode::FAILURE;
    }

    cprintln!("Origin: <green>0x{:04X}</>", assembly.image.origin);
    match assembly.image.export {
        Some(addr) => cprintln!("Export: <green>0x{:04X}</>", addr),
        None => println!("Export: (not set)"),
    }
    ExitCode::SUCCESS
}
