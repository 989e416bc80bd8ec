//! Property file fixtures

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temporary config directory populated with `(file name, content)` pairs
pub fn config_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        write(dir.path(), name, content);
    }
    dir
}

pub fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

pub const APPLICATION_YML: &str = "\
app:
  name: hiboot
  project: hidevopsio
  profiles:
    include:
      - web
server:
  port: 8080
logging:
  level: debug
fake:
  name: ${app.name}
";

pub const APPLICATION_LOCAL_YML: &str = "\
server:
  port: 8081
";
