use clap::Args;

pub mod layout;
pub mod locate;
pub mod replay;

#[derive(Args, Debug, Clone)]
pub struct SizeArgs {
    #[arg(long, default_value_t = 700, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
}
