use clap::Parser;

/// Places the gradients and labels of a chord diagram of vote transfers.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The chord layout in JSON format: candidate names, the angular span of each
    /// candidate and the two endpoints of each chord.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (file path, 'stdout' or empty) Where to write the placements in JSON format. Defaults to
    /// the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected placements in JSON format. If provided,
    /// rcvchord will check that the output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
