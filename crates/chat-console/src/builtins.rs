//! Commands every console ships with: `clear`, `help`, `parsers`, `plugins`

use miette::Result;

use crate::command::{Command, CommandContext};
use crate::param::Parameter;

/// The built-in commands, in registration order
pub fn commands() -> Vec<Command> {
    vec![clear(), help(), parsers(), plugins()]
}

pub fn clear() -> Command {
    Command::new("clear", run_clear).description("Clears all the messages")
}

pub fn help() -> Command {
    Command::new("help", run_help)
        .description("Shows a list of commands")
        .parameter(Parameter::new::<String>("command").optional())
}

pub fn parsers() -> Command {
    Command::new("parsers", run_parsers)
        .description("Shows a list of parsers")
        .parameter(Parameter::new::<String>("type").optional())
        .parameter(Parameter::new::<String>("input").optional())
}

pub fn plugins() -> Command {
    Command::new("plugins", run_plugins).description("Shows a list of plugins")
}

fn run_clear(ctx: &mut CommandContext<'_>) -> Result<()> {
    ctx.clear_output();
    ctx.reply("Messages has been cleared!");
    Ok(())
}

fn run_help(ctx: &mut CommandContext<'_>) -> Result<()> {
    let mut out = String::new();

    if let Some(name) = ctx.args().value::<String>(0)? {
        match ctx.commands().lookup(&name) {
            Some(cmd) => {
                let signature = cmd.signature();
                out.push_str(&format!("\nName: {}", cmd.name()));
                if let Some(description) = &signature.description {
                    out.push_str(&format!("\nDescription: {}", description));
                }
                if let Some(owner) = cmd.owner() {
                    out.push_str(&format!("\nPlugin: {}", owner));
                }
                if let Some(rendered) = signature.render() {
                    out.push_str(&format!("\nParameters: {}", rendered));
                    out.push_str(&legend(&rendered));
                }
            }
            None => out.push_str(&format!("Command called \"{}\" does not exist", name)),
        }
    } else {
        let commands = ctx.commands();
        out.push_str(&format!("\nCommands ({}):\n", commands.len()));
        for cmd in commands.all() {
            out.push_str(&format!("\n{}", cmd.name()));
        }
    }

    ctx.reply(out);
    Ok(())
}

/// Explain each annotation symbol that appears in a signature
fn legend(signature: &str) -> String {
    let mut out = String::new();
    if signature.contains('?') {
        out.push_str("\n? means optional");
    }
    if signature.contains('#') {
        out.push_str("\n# means the following arguments are linked");
    }
    if signature.contains('(') && signature.contains(')') {
        out.push_str("\n() shows a description");
    }
    if signature.contains('[') && signature.contains(']') {
        out.push_str("\n[] shows what type it is");
    }
    out
}

fn run_parsers(ctx: &mut CommandContext<'_>) -> Result<()> {
    let mut out = String::new();

    if let Some(type_name) = ctx.args().value::<String>(0)? {
        let input = ctx.args().value::<String>(1)?;
        match ctx.parsers().find(&type_name) {
            Some((parser, owner)) => match input {
                // position 2: the input is the second argument of this command
                Some(input) => match parser.parse_any(2, &input) {
                    Ok(_) => out.push_str("Valid"),
                    Err(err) => out.push_str(err.message()),
                },
                None => {
                    out.push_str(&format!("\nName: {}", parser.value_type()));
                    out.push_str(&format!("\nExample: {}", parser.example()));
                    if let Some(owner) = owner {
                        out.push_str(&format!("\nPlugin: {}", owner));
                    }
                }
            },
            None => out.push_str(&format!("Parser with type \"{}\" does not exist", type_name)),
        }
    } else if ctx.parsers().is_empty() {
        out.push_str("No parsers has been found");
    } else {
        let parsers = ctx.parsers().list();
        out.push_str(&format!("\nParsers ({}):\n", parsers.len()));
        for parser in parsers {
            out.push_str(&format!("\n{}", parser.type_name));
        }
    }

    ctx.reply(out);
    Ok(())
}

fn run_plugins(ctx: &mut CommandContext<'_>) -> Result<()> {
    let plugins = ctx.plugins();
    let host = plugins.host();

    let mut out = format!("\nPlugins ({}):\n", host.len());
    for (i, plugin) in host.iter().enumerate() {
        let dependency = if plugins.is_registered(&plugin.guid) { "Yes" } else { "No" };
        out.push_str(&format!(
            "\nName: {}\nGUID: {}\nVersion: {}\nDependency: {}",
            plugin.name, plugin.guid, plugin.version, dependency
        ));
        if i + 1 != host.len() {
            out.push('\n');
        }
    }

    ctx.reply(out);
    Ok(())
}
