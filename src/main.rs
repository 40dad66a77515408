pub mod builder;
pub mod cli;
pub mod defs;
pub mod nodedef;

fn main() -> anyhow::Result<()> {
    let command_line_interface = cli::CommandLineInterface::load();
    command_line_interface.run()
}
