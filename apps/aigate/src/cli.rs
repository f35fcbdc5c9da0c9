use clap::Parser;

#[derive(Parser)]
#[command(name = "aigate")]
pub(crate) struct Cli {
    #[arg(long, env = "AIGATE_HOST", default_value = "[::]")]
    pub(crate) host: String,
    #[arg(long, env = "AIGATE_PORT", default_value_t = 50051)]
    pub(crate) port: u16,
}
