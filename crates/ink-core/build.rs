//! Rejects malformed embedded tables before they are baked into the library.

const EMBEDDED: &[(&str, &str)] = &[
    (
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    ),
    (
        "src/pinyin/default_pinyin.toml",
        include_str!("src/pinyin/default_pinyin.toml"),
    ),
];

fn main() {
    for (path, content) in EMBEDDED {
        println!("cargo:rerun-if-changed={path}");
        let table: toml::Table = content
            .parse()
            .unwrap_or_else(|e| panic!("{path} contains invalid TOML: {e}"));
        if table.is_empty() {
            panic!("{path} has no tables");
        }
    }
}
