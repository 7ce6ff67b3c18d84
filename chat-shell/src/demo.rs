//! Sample plugin so every console path can be tried from the terminal

use chat_console::{ArgumentError, Command, HostPlugin, Parameter, PluginDescriptor, TypeParser};

pub const GUID: &str = "chat-shell.demo";

/// An RGB color written as `r,g,b`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub fn host_plugin() -> HostPlugin {
    HostPlugin::new(GUID, "Demo", env!("CARGO_PKG_VERSION"))
}

pub fn descriptor() -> PluginDescriptor {
    PluginDescriptor::new(GUID)
        .commands([echo(), add(), paint()])
        .parser(rgb_parser())
}

fn echo() -> Command {
    Command::new("echo", |ctx| {
        let words: Vec<String> = ctx.args().values(0)?.unwrap_or_default();
        ctx.reply(words.join(" "));
        Ok(())
    })
    .description("Prints its arguments")
    .parameter(Parameter::new::<String>("text").linked())
}

fn add() -> Command {
    Command::new("add", |ctx| {
        let a: i64 = ctx.args().value(0)?.unwrap_or_default();
        let b: i64 = ctx.args().value(1)?.unwrap_or_default();
        let sum = a
            .checked_add(b)
            .ok_or_else(|| ArgumentError::error("The sum does not fit in an i64"))?;
        ctx.reply(sum.to_string());
        Ok(())
    })
    .description("Adds two numbers")
    .parameter(Parameter::new::<i64>("a"))
    .parameter(Parameter::new::<i64>("b"))
}

fn paint() -> Command {
    Command::new("paint", |ctx| {
        let color: Option<Rgb> = ctx.args().value(0)?;
        if let Some(Rgb { r, g, b }) = color {
            ctx.reply(format!("#{:02x}{:02x}{:02x}", r, g, b));
        }
        Ok(())
    })
    .description("Shows a color as hex")
    .parameter(Parameter::new::<Rgb>("color").describe("r,g,b"))
}

fn rgb_parser() -> TypeParser<Rgb> {
    TypeParser::new(
        |position, raw: &str| {
            let channels: Vec<&str> = raw.split(',').collect();
            let [r, g, b] = channels.as_slice() else {
                return Err(ArgumentError::warning(format!(
                    "Argument {} must be three channels like 255,128,0",
                    position
                )));
            };
            let channel = |text: &str| {
                text.trim().parse::<u8>().map_err(|_| {
                    ArgumentError::warning(format!(
                        "Argument {} has a channel outside 0-255: {}",
                        position, text
                    ))
                })
            };
            Ok(Rgb {
                r: channel(*r)?,
                g: channel(*g)?,
                b: channel(*b)?,
            })
        },
        "255,128,0",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_console::{Console, Dispatch, MessageLog, Severity};
    use pretty_assertions::assert_eq;

    fn console() -> Console<MessageLog> {
        Console::builder(MessageLog::new())
            .host_plugin(host_plugin())
            .on_register(descriptor)
            .build()
    }

    fn last(console: &Console<MessageLog>) -> &str {
        console.sink().last().map(|m| m.text.as_str()).unwrap_or_default()
    }

    #[test]
    fn test_demo_commands() {
        let mut console = console();
        console.execute("echo hello there");
        assert_eq!(last(&console), "hello there");
        console.execute("add 40 2");
        assert_eq!(last(&console), "42");
        console.execute("paint 255,128,0");
        assert_eq!(last(&console), "#ff8000");
    }

    #[test]
    fn test_demo_failures() {
        let mut console = console();
        assert_eq!(
            console.execute(&format!("add {} 1", i64::MAX)),
            Dispatch::Failed(Severity::Error)
        );
        assert_eq!(console.execute("paint 300,0,0"), Dispatch::Failed(Severity::Warning));
        assert_eq!(last(&console), "Argument 1 has a channel outside 0-255: 300");
        assert_eq!(console.execute("paint red"), Dispatch::Failed(Severity::Warning));
    }

    #[test]
    fn test_demo_is_registered() {
        let mut console = console();
        assert!(console.plugins().is_registered(GUID));
        console.execute("parsers");
        assert_eq!(last(&console), "\nParsers (1):\n\nRgb");
    }
}
