use std::path::PathBuf;
use std::{env, fs};
use tga_raster::{read_tga_file, render_demo_polygon, CLIParser, Color, Format};

const RESULT_IMAGE_PATH: &str = "tests/result.tga";
const RAW_RESULT_IMAGE_PATH: &str = "tests/result_raw.tga";

fn get_project_root_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn get_result_image_path(relative_path: &str) -> PathBuf {
    let mut root_path = get_project_root_path();
    root_path.push(relative_path);
    root_path
}

fn cleanup(result_image_path: &PathBuf) {
    if result_image_path.exists() && result_image_path.is_file() {
        fs::remove_file(result_image_path).expect("Deletion of output file failed");
    }
}

fn render_to(relative_path: &str, rle: &str) -> PathBuf {
    let result_image_path = get_result_image_path(relative_path);
    cleanup(&result_image_path);
    let mut cli_parser = CLIParser::new();
    let arguments = cli_parser.parse(vec![
        "test",
        result_image_path.to_str().unwrap(),
        "--rle",
        rle,
    ]);
    render_demo_polygon(&arguments).expect("Rendering failed");
    assert!(result_image_path.exists(), "Output file was not created");
    result_image_path
}

#[test]
fn test_render_demo_polygon() {
    let result_image_path = render_to(RESULT_IMAGE_PATH, "true");
    let image = read_tga_file(&result_image_path).expect("Reading rendered image failed");
    cleanup(&result_image_path);

    assert_eq!(image.width(), 1000);
    assert_eq!(image.height(), 1000);
    assert_eq!(image.format(), Format::Rgb);
    // The canvas is flipped before writing, so polygon row y lands on row 999 - y.
    assert_eq!(image.get(300, 999 - 600), Color::rgb(255, 0, 0));
    assert_eq!(image.get(100, 999 - 500), Color::rgb(255, 0, 0));
    assert_eq!(image.get(900, 999 - 100), Color::rgb(0, 0, 0));
    assert_eq!(image.get(300, 999 - 900), Color::rgb(0, 0, 0));
}

#[test]
fn test_render_demo_polygon_without_rle() {
    let raw_path = render_to(RAW_RESULT_IMAGE_PATH, "false");
    let raw_size = fs::metadata(&raw_path).expect("Output file missing").len();
    let image = read_tga_file(&raw_path).expect("Reading rendered image failed");
    cleanup(&raw_path);

    assert_eq!(raw_size, 18 + 1000 * 1000 * 3 + 26);
    assert_eq!(image.get(300, 999 - 600), Color::rgb(255, 0, 0));
}
