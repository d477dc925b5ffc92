use std::{fs, path::Path};

use blast::{
    interpreter::evaluator::{core::Interpreter, output::OutputBuffer},
    run_source_with,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn scripts_match_expected_output() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scripts");
    let mut count = 0;

    for entry in
        WalkDir::new(&root).sort_by_file_name()
                           .into_iter()
                           .filter_map(Result::ok)
                           .filter(|e| e.path().extension().is_some_and(|ext| ext == "bl"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                            panic!("Missing expected output {expected_path:?}: {e}")
                                                        });

        let buffer = OutputBuffer::new();
        let mut interpreter = Interpreter::new().with_output(buffer.clone());
        let status = run_source_with(&source, &mut interpreter).unwrap_or_else(|e| {
                                                                   panic!("Script {path:?} failed: {e}")
                                                               });

        assert_eq!(status, 0, "{path:?} exited with {status}");
        assert_eq!(buffer.contents(), expected, "output of {path:?}");
        count += 1;
    }

    assert!(count > 0, "No scripts found in {root:?}");
}
