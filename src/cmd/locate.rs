use super::SizeArgs;
use clap::Args;
use pianokeys::config::PianoConfig;
use pianokeys::error::PkResult;
use pianokeys::geometry::{hit, Layout};
use pianokeys::keys;

#[derive(Args, Debug, Clone)]
pub struct LocateArgs {
    #[command(flatten)]
    pub size: SizeArgs,

    #[command(flatten)]
    pub config: PianoConfig,

    #[arg(long, allow_negative_numbers = true)]
    pub x: f32,

    #[arg(long, allow_negative_numbers = true)]
    pub y: f32,
}

pub fn run(args: &LocateArgs, config: &PianoConfig) -> PkResult<()> {
    let layout = Layout::compute(args.size.width, args.size.height, config.into());

    match hit::locate_point(&layout, args.x, args.y) {
        Some(ix) => {
            let class = if keys::is_white(ix) { "white" } else { "black" };
            println!(
                "key: {} ({}, octave {})",
                ix,
                class,
                keys::octave_of(ix)
            );
        }
        None => println!("key: none"),
    }
    Ok(())
}
