use regex::Regex;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

fn main() {
    let root = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };

    let readme_path = root.join("README.md");
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_default();

    if let Ok(file) = File::open(&readme_path) {
        let version_regex = Regex::new(r"^v\d+\.\d+\.\d+\s*$").unwrap();
        let buf_reader = BufReader::new(file);
        let lines: Result<Vec<_>, _> = buf_reader.lines().collect();
        let mut new_content = String::new();

        if let Ok(lines) = lines {
            for line in lines {
                if version_regex.is_match(&line) {
                    new_content.push_str(&format!("v{}  \n", version));
                } else {
                    new_content.push_str(&line);
                    new_content.push('\n');
                }
            }
        }

        if let Ok(mut file) = File::create(&readme_path) {
            let _ = file.write_all(new_content.as_bytes());
        }
    }
}
