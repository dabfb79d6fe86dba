use super::SizeArgs;
use crate::reports::{self, ReplayStep};
use clap::Args;
use pianokeys::config::PianoConfig;
use pianokeys::error::PkResult;
use pianokeys::gesture::PointerEvent;
use pianokeys::view::PianoView;
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub size: SizeArgs,

    #[command(flatten)]
    pub config: PianoConfig,

    /// JSON array of pointer events.
    #[arg(short, long)]
    pub script: String,
}

pub fn run(args: &ReplayArgs, config: &PianoConfig) -> PkResult<()> {
    let content = fs::read_to_string(&args.script)?;
    let events: Vec<PointerEvent> = serde_json::from_str(&content)?;
    info!("Replaying {} pointer events from {}", events.len(), args.script);

    let mut piano = PianoView::new(config.clone())?;
    piano.resize(args.size.width, args.size.height);

    let mut steps = Vec::with_capacity(events.len());
    for (step, event) in events.into_iter().enumerate() {
        let input = describe(&event);
        let emitted = piano.handle_pointer(event);
        steps.push(ReplayStep {
            step,
            input,
            emitted,
        });
    }

    reports::print_replay(&steps, piano.pressed_keys());
    Ok(())
}

fn describe(event: &PointerEvent) -> String {
    match event {
        PointerEvent::Down(p) => format!("down #{} ({}, {})", p.id, p.x, p.y),
        PointerEvent::Up(p) => format!("up #{} ({}, {})", p.id, p.x, p.y),
        PointerEvent::Move { pointers } => pointers
            .iter()
            .map(|p| format!("move #{} ({}, {})", p.id, p.x, p.y))
            .collect::<Vec<_>>()
            .join(", "),
        PointerEvent::Cancel { id } => format!("cancel #{}", id),
    }
}
