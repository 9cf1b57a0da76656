use super::*;
use crate::extractor::ExtractError;
use crate::tokenizer::TokenizeError;
use std::fs;
use tempfile::TempDir;

/// One token per whitespace-delimited word
struct WordCounter;

impl TokenCounter for WordCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, TokenizeError> {
        Ok(text.split_whitespace().count())
    }

    fn name(&self) -> &str {
        "words"
    }
}

fn write(dir: &TempDir, rel: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn processor(max_tokens: usize) -> DirectoryProcessor {
    DirectoryProcessor::new(TokenChunker::new(WordCounter, max_tokens))
}

#[test]
fn test_no_html_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, "notes.txt", b"plain text");
    write(&dir, "sub/readme.md", b"# heading");

    let map = process_directory_with(dir.path(), 10, WordCounter).unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    let report = processor(10).process(dir.path()).unwrap();
    assert_eq!(report.file_count(), 0);
    assert_eq!(report.chunk_count(), 0);
}

#[test]
fn test_nested_file_keyed_by_full_path() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "level1/level2/page.html",
        b"<html><body><p>alpha beta gamma</p></body></html>",
    );

    let map = process_directory_with(dir.path(), 10, WordCounter).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&path).unwrap(), &vec!["alpha beta gamma".to_string()]);
}

#[test]
fn test_chunks_follow_budget() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "doc.html", b"<p>alpha beta gamma delta</p>");

    let map = process_directory_with(dir.path(), 2, WordCounter).unwrap();
    assert_eq!(map[&path], vec!["alpha beta", "gamma delta"]);
}

#[test]
fn test_suffix_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let kept = write(&dir, "kept.html", b"<p>kept</p>");
    write(&dir, "upper.HTML", b"<p>upper</p>");
    write(&dir, "short.htm", b"<p>short</p>");
    write(&dir, "page.html.bak", b"<p>backup</p>");

    let map = process_directory_with(dir.path(), 10, WordCounter).unwrap();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec![&kept]);
}

#[test]
fn test_directory_named_like_html_is_not_a_file() {
    let dir = TempDir::new().unwrap();
    let inner = write(&dir, "site.html/index.html", b"<p>inside</p>");

    let map = process_directory_with(dir.path(), 10, WordCounter).unwrap();
    assert_eq!(map.len(), 1);
    assert!(map.contains_key(&inner));
}

#[test]
fn test_script_text_never_reaches_chunks() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "page.html",
        b"<html><body><p>Hello</p><script>ignored()</script></body></html>",
    );

    let map = process_directory_with(dir.path(), 10, WordCounter).unwrap();
    assert_eq!(map[&path], vec!["Hello"]);
}

#[test]
fn test_empty_html_yields_no_chunks() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "blank.html", b"<html><body>   </body></html>");

    let map = process_directory_with(dir.path(), 10, WordCounter).unwrap();
    assert_eq!(map[&path], Vec::<String>::new());
}

#[test]
fn test_invalid_utf8_aborts_with_path() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a_good.html", b"<p>fine</p>");
    let bad = write(&dir, "b_bad.html", &[0xFF, 0xFE, 0xFD]);

    let err = processor(10).process(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        ProcessError::Extract {
            source: ExtractError::Decode(_),
            ..
        }
    ));
    assert_eq!(err.path(), Some(bad.as_path()));
    assert!(err.to_string().contains("b_bad.html"));
}

#[test]
fn test_skip_policy_keeps_going() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "a_good.html", b"<p>fine words</p>");
    let bad = write(&dir, "b_bad.html", &[0xFF, 0xFE, 0xFD]);
    let also_good = write(&dir, "c_good.html", b"<p>more</p>");

    let report = processor(10)
        .on_error(FailurePolicy::Skip)
        .process(dir.path())
        .unwrap();

    assert_eq!(report.file_count(), 2);
    assert!(report.chunks.contains_key(&good));
    assert!(report.chunks.contains_key(&also_good));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, bad);
    assert!(report.skipped[0].reason.contains("not valid UTF-8"));
}

#[test]
fn test_tokenizer_failure_identifies_file() {
    struct FailingCounter;

    impl TokenCounter for FailingCounter {
        fn count_tokens(&self, _text: &str) -> Result<usize, TokenizeError> {
            Err(TokenizeError::Rejected("vocabulary missing".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    let dir = TempDir::new().unwrap();
    let path = write(&dir, "page.html", b"<p>some words</p>");

    let err = process_directory_with(dir.path(), 10, FailingCounter).unwrap_err();
    assert!(matches!(err, ProcessError::Tokenize { .. }));
    assert_eq!(err.path(), Some(path.as_path()));
}

#[test]
fn test_missing_root_is_a_walk_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = processor(10).process(&missing).unwrap_err();
    assert!(matches!(err, ProcessError::Walk { .. }));
}

#[test]
fn test_custom_suffix() {
    let dir = TempDir::new().unwrap();
    let htm = write(&dir, "legacy.htm", b"<p>old page</p>");
    write(&dir, "modern.html", b"<p>new page</p>");

    let report = processor(10).suffix(".htm").process(dir.path()).unwrap();
    assert_eq!(report.chunks.keys().collect::<Vec<_>>(), vec![&htm]);
}

#[test]
fn test_custom_extractor() {
    struct Verbatim;

    impl TextExtractor for Verbatim {
        fn extract(&self, content: &str) -> Result<String, ExtractError> {
            Ok(content.to_string())
        }
    }

    let dir = TempDir::new().unwrap();
    let path = write(&dir, "raw.html", b"<b>tag</b>");

    let report = processor(10).extractor(Verbatim).process(dir.path()).unwrap();
    assert_eq!(report.chunks[&path], vec!["<b>tag</b>"]);
}

#[cfg(unix)]
#[test]
fn test_non_utf8_file_name_is_selected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(OsStr::from_bytes(b"caf\xe9.html"));
    fs::write(&path, b"<p>hello there</p>").unwrap();

    let report = processor(10).process(dir.path()).unwrap();
    assert_eq!(report.file_count(), 1);
    assert_eq!(report.chunks[&path], vec!["hello there"]);

    let keyed = report.chunks_by_display_path();
    let key = path.to_string_lossy().into_owned();
    assert!(key.ends_with("caf\u{FFFD}.html"));
    assert_eq!(keyed[&key], ["hello there".to_string()]);
    assert!(serde_json::to_string(&keyed).is_ok());
}

#[test]
fn test_display_keys_match_utf8_paths() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "docs/page.html", b"<p>one two</p>");

    let report = processor(10).process(dir.path()).unwrap();
    let keyed = report.chunks_by_display_path();
    assert_eq!(keyed.len(), 1);
    assert_eq!(keyed[path.to_str().unwrap()], ["one two".to_string()]);
}

#[test]
fn test_selects() {
    let processor = processor(10);
    assert!(processor.selects(Path::new("a/b/index.html")));
    assert!(!processor.selects(Path::new("a/b/index.HTML")));
    assert!(!processor.selects(Path::new("a/b/index.htm")));
}

#[test]
fn test_default_tiktoken_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "docs/intro.html", b"<h1>Intro</h1>\n<p>hello world</p>");

    let map = process_directory(dir.path(), 300).unwrap();
    assert_eq!(map[&path], vec!["Intro hello world"]);
}

#[test]
fn test_from_config() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "page.html", b"<p>hello world</p>");

    let config = Config {
        max_tokens: 1,
        ..Config::default()
    };
    let report = DirectoryProcessor::from_config(&config)
        .unwrap()
        .process(dir.path())
        .unwrap();
    assert_eq!(report.chunks[&path], vec!["hello", "world"]);
}
