//! Test utilities and shared fixtures for the tscat workspace.
//!
//! These helpers are compiled for this crate's own tests and, through the
//! `testing` feature, for the test suites of the other workspace crates.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_resource(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create resource directory");
    }
    fs::write(&path, content).expect("Failed to write resource file");
    path
}

/// Translation resource fixtures.
pub mod ts_fixtures {
    /// A small Lithuanian catalog covering finished, unfinished, markup and
    /// multi-placeholder messages.
    pub fn lithuanian_sample() -> &'static str {
        r#"<?xml version="1.0" ?><!DOCTYPE TS><TS language="lt" version="2.0">
<context>
    <name>About</name>
    <message>
        <source>QField Version: %1</source>
        <translation type="unfinished"/>
    </message>
    <message>
        <source>QField Settings folder: %1</source>
        <translation>QField nustatymų katalogas: %1</translation>
    </message>
    <message>
        <source>QField Version: %1 (%2)</source>
        <translation type="unfinished"/>
    </message>
</context>
<context>
    <name>DateTime</name>
    <message>
        <source>Ok</source>
        <translation>Gerai</translation>
    </message>
</context>
<context>
    <name>FeatureForm</name>
    <message>
        <source>Add feature on &lt;i&gt;%1&lt;/i&gt;</source>
        <translation>Pridėti objektų į &lt;i&gt;%1&lt;/i&gt;</translation>
    </message>
</context>
<context>
    <name>qgismobileapp</name>
    <message>
        <source>Main Menu</source>
        <translation>Pagrindinis meniu</translation>
    </message>
    <message>
        <source>Log</source>
        <translation>Log&apos;as</translation>
    </message>
</context>
</TS>
"#
    }

    /// A catalog exercising the optional message children and numerus forms.
    pub fn numerus_sample() -> &'static str {
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="lt_LT" sourcelanguage="en">
<context>
    <name>QFieldCloudProjectsModel</name>
    <message numerus="yes">
        <location filename="../src/core/qfieldcloudprojectsmodel.cpp" line="412"/>
        <source>%n file(s) pending upload</source>
        <extracomment>Shown in the synchronization panel</extracomment>
        <translation>
            <numerusform>%n failas laukia įkėlimo</numerusform>
            <numerusform>%n failai laukia įkėlimo</numerusform>
            <numerusform>%n failų laukia įkėlimo</numerusform>
        </translation>
    </message>
    <message numerus="yes">
        <source>%n layer(s) in %1</source>
        <translation type="unfinished">
            <numerusform></numerusform>
            <numerusform></numerusform>
            <numerusform></numerusform>
        </translation>
    </message>
    <message>
        <source>Open</source>
        <comment>verb</comment>
        <translatorcomment>Imperative form</translatorcomment>
        <translation>Atidaryti</translation>
    </message>
    <message>
        <source>Open</source>
        <comment>adjective</comment>
        <translation>Atviras</translation>
    </message>
    <message>
        <source>Open</source>
        <translation>Atverti</translation>
    </message>
    <message>
        <source>Remove</source>
        <oldsource>Delete</oldsource>
        <translation></translation>
    </message>
    <message>
        <source>Legacy sync</source>
        <translation type="vanished">Senas sinchronizavimas</translation>
    </message>
</context>
</TS>
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_write_resource_creates_parents() {
        let dir = create_temp_dir();
        let path = write_resource(dir.path(), "nested/qfield_lt.ts", "<TS/>");
        assert_eq!(fs::read_to_string(path).unwrap(), "<TS/>");
    }
}
