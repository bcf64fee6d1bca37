use std::env::args_os;

use tga_raster::{render_demo_polygon, CLIParser};

fn main() {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match render_demo_polygon(&arguments) {
        Ok(_) => println!("Rendering successful"),
        Err(e) => eprintln!("Rendering failed because of: {}", e),
    }
}
