//! Fallback to `<install root>/output` when no output directory is given.
//!
//! Kept in its own test binary: it points `PDF2PNG_HOME` at a scratch
//! directory, which is process-wide state. Both cases run inside one test so
//! they never race on the variable.

mod common;

use common::{fake_pdf, pngs_in, FakeRasterizer};
use pdf2png::{convert_and_log_with, convert_with, default_output_dir, ConversionRequest};
use tempfile::TempDir;

#[test]
fn omitted_or_empty_output_dir_uses_and_creates_the_default() {
    let home = TempDir::new().unwrap();
    std::env::set_var("PDF2PNG_HOME", home.path());

    let expected = home.path().join("output");
    assert_eq!(default_output_dir(), expected);
    assert!(!expected.exists());

    // No output directory at all.
    let pdf = fake_pdf(home.path(), "doc.pdf");
    let output = convert_with(&ConversionRequest::new(&pdf), &FakeRasterizer::pages(2)).unwrap();

    assert_eq!(output.output_dir, expected);
    assert_eq!(pngs_in(&expected), vec!["doc_page_1.png", "doc_page_2.png"]);

    // An empty output directory means the same thing.
    let pdf = fake_pdf(home.path(), "blank.pdf");
    let request = ConversionRequest::new(&pdf).output_dir("");
    let output = convert_and_log_with(&request, &FakeRasterizer::pages(1))
        .expect("empty output dir should fall back to the default");

    assert_eq!(output.output_dir, expected);
    assert!(expected.join("blank_page_1.png").is_file());
    assert!(!std::env::current_dir().unwrap().join("blank_page_1.png").exists());

    std::env::remove_var("PDF2PNG_HOME");
}
