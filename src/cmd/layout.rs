use super::SizeArgs;
use crate::reports;
use clap::Args;
use pianokeys::config::PianoConfig;
use pianokeys::error::PkResult;
use pianokeys::geometry::Layout;
use pianokeys::press::PressedKeys;

#[derive(Args, Debug, Clone)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub size: SizeArgs,

    #[command(flatten)]
    pub config: PianoConfig,

    /// Print the key rects as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: &LayoutArgs, config: &PianoConfig) -> PkResult<()> {
    let layout = Layout::compute(args.size.width, args.size.height, config.into());

    if args.json {
        println!("{}", serde_json::to_string_pretty(layout.keys())?);
        return Ok(());
    }

    reports::print_dimensions(&layout);
    reports::print_key_table(&layout, &PressedKeys::default());
    Ok(())
}
