use colored::Colorize;

use graft_module::{read_module, MethodDef};
use graft_patcher::{apply_patches, load_manifest};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Apply(args) => cmd_apply(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let sources = load_manifest(&args.manifest)?;
    let entry_count: usize = sources.iter().map(|s| s.entries.len()).sum();

    apply_patches(&args.input, &args.output, &sources)?;

    println!(
        "{} Applied {} patch entr{} from {} source{}",
        "✓".green().bold(),
        entry_count.to_string().bold(),
        if entry_count == 1 { "y" } else { "ies" },
        sources.len(),
        if sources.len() == 1 { "" } else { "s" },
    );
    println!("  Input:  {}", args.input.display());
    println!("  Output: {}", args.output.display().to_string().bold());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let module = read_module(&args.module)?;

    println!("Module {}", module.name.bold());
    for ty in &module.types {
        println!("  {}", ty.name.to_string().yellow());
        for method in &ty.methods {
            print_method(method, args.bodies);
        }
    }
    Ok(())
}

fn print_method(method: &MethodDef, bodies: bool) {
    let params = method
        .params
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    match &method.body {
        Some(body) => {
            println!(
                "    {}({}) [{} instr, {} locals{}]",
                method.name.cyan(),
                params,
                body.instructions.len(),
                body.locals.len(),
                if body.has_return_value { ", returns" } else { "" },
            );
            if bodies {
                for (index, instruction) in body.instructions.iter().enumerate() {
                    println!("      {index:>4}: {instruction}");
                }
            }
        }
        None => println!(
            "    {}({}) [{}]",
            method.name.cyan(),
            params,
            "no body".dimmed(),
        ),
    }
}
