use exif_formatter::{ExifMetadata, Formatter, FormatterConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let accessor = Formatter::new();
    let codec = Formatter::with_config(FormatterConfig::codec());

    afl::fuzz!(|data: &[u8]| {
        let Ok(s) = std::str::from_utf8(data) else {
            return;
        };
        let (name, value) = s.split_once('=').unwrap_or((s, ""));

        let _ = accessor.format(name, value);
        let _ = accessor.validate(name, value);
        let _ = codec.format(name, value);
        let _ = codec.validate(name, value);
        let _ = accessor.check_format_only(name, value);
        if let Some(tag) = accessor.canonical_tag(name) {
            let _ = accessor.validate_value_range(tag, value);
        }
        let _ = accessor.validate_value_range(name, value);

        let mut meta = ExifMetadata::new();
        if meta.set_value(name, value).is_ok() {
            let _ = meta.get_rationals(name);
        }
    });
}
