use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const DEFAULT_OUTPUT_FILE: &str = "output.tga";

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_output_file_argument(command);
        Self::register_rle_argument(command)
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_rle_argument(command: Command) -> Command {
        command.arg(Self::create_rle_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_output_file_argument() -> Arg {
        Arg::new("output_file")
            .help("Path to TGA output file")
            .value_parser(value_parser!(PathBuf))
            .default_value(DEFAULT_OUTPUT_FILE)
    }

    fn create_rle_argument() -> Arg {
        arg!(rle: -r --rle <RLE> "Run-length encode the pixel data")
            .default_value("true")
            .value_parser(value_parser!(bool))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            output_file: Self::extract_output_file_argument(matches),
            use_rle: Self::extract_rle_argument(matches),
        }
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Output file has a default value, but was unset.")
            .clone()
    }

    fn extract_rle_argument(matches: &ArgMatches) -> bool {
        matches
            .get_one::<bool>("rle")
            .expect("RLE flag has a default value, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
