use chat_console::{Console, ConsoleConfig};
use chat_shell::{demo, Repl, TerminalSink};
use clap::Parser;
use miette::Result;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Size hint stamped on every message
    #[arg(long, default_value_t = 32)]
    size: u32,

    /// Disable replacing the input with the closest command on Tab
    #[arg(long)]
    no_tab: bool,

    /// Print messages without colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Set up miette for beautiful error reporting
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();
    let config = ConsoleConfig::default()
        .with_message_size(cli.size)
        .with_tab_completion(!cli.no_tab);

    println!("Chat Shell v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' to list commands, 'exit' or Ctrl+D to leave");
    println!();

    let console = Console::builder(TerminalSink::new(!cli.no_color))
        .config(config)
        .host_plugin(demo::host_plugin())
        .on_register(demo::descriptor)
        .build();

    let mut repl = Repl::new(console);
    repl.run()?;

    Ok(())
}
