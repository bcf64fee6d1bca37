use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const LOG_CONFIG_FILE: &str = "log4rs.yaml";
const FALLBACK_PATTERN: &str = "{d(%H:%M:%S%.3f)} {l} {t} - {m}{n}";

#[ctor::ctor]
fn init() {
    if log4rs::init_file(LOG_CONFIG_FILE, Default::default()).is_err() {
        if let Err(e) = init_fallback() {
            eprintln!("Logging could not be initialised: {}", e);
        }
    }
}

// used when the working directory has no log4rs.yaml
fn init_fallback() -> Result<(), Box<dyn std::error::Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(FALLBACK_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
    log4rs::init_config(config)?;
    Ok(())
}

pub fn log_header(header: &[u8]) {
    fn get_byte_array(bytes: &[u8]) -> Vec<String> {
        bytes.iter().map(|byte| format!("{:02X}", byte)).collect()
    }
    log::debug!("TGA header {:?}", get_byte_array(header));
}
