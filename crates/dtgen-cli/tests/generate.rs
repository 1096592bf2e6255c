//! Integration tests for the generation pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use dtgen_cli::pipeline::{GenerateConfig, read_master, run_generate, select_catalog};
use dtgen_model::{
    ClassMode, FailurePolicy, Field, FieldSet, GenError, SubstitutionScope, TokenKind,
};

const IMPL_MASTER: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../dtgen-core/tests/data/DoubleDatasetImpl.java"
);
const INTERFACE_MASTER: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../dtgen-core/tests/data/DoubleDataset.java"
);

fn stage_master(dir: &Path, source: &str, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::copy(source, &path).expect("copy master");
    path
}

fn listed(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[test]
fn generates_scalar_implementations() {
    let dir = tempfile::tempdir().unwrap();
    let master = stage_master(dir.path(), IMPL_MASTER, "DoubleDatasetImpl.java");
    let out = dir.path().join("out");

    let result = run_generate(&GenerateConfig::new(&master, &out)).unwrap();

    assert_eq!(result.catalog, "scalar");
    assert_eq!(result.mode, ClassMode::Implementation);
    assert!(!result.has_errors());
    assert_eq!(
        listed(&out),
        vec![
            "BooleanDatasetBaseImpl.java",
            "ByteDatasetImpl.java",
            "FloatDatasetImpl.java",
            "IntegerDatasetImpl.java",
            "LongDatasetImpl.java",
            "ObjectDatasetBaseImpl.java",
            "ShortDatasetImpl.java",
            "StringDatasetBaseImpl.java",
        ]
    );

    let short = fs::read_to_string(out.join("ShortDatasetImpl.java")).unwrap();
    assert!(
        short.contains("// This is generated from DoubleDatasetImpl.java by dtgen\n\npackage ")
    );
    assert!(short.contains("data[i] = (short) dataset.getElementLongAbs(iter.index);"));
    assert!(
        short.contains("public class ShortDatasetImpl extends AbstractDataset<ShortDatasetImpl>")
    );
}

#[test]
fn generates_interfaces_from_interface_master() {
    let dir = tempfile::tempdir().unwrap();
    let master = stage_master(dir.path(), INTERFACE_MASTER, "DoubleDataset.java");
    let out = dir.path().join("out");

    let config = GenerateConfig {
        scope: SubstitutionScope::Marked,
        required: Some(FieldSet::only(Field::PrimitiveName)),
        ..GenerateConfig::new(&master, &out)
    };
    let result = run_generate(&config).unwrap();

    assert_eq!(result.catalog, "scalar");
    assert_eq!(result.mode, ClassMode::Interface);
    assert!(!result.has_errors());
    assert_eq!(
        listed(&out),
        vec![
            "BooleanDataset.java",
            "ByteDataset.java",
            "FloatDataset.java",
            "IntegerDataset.java",
            "LongDataset.java",
            "ObjectDataset.java",
            "ShortDataset.java",
            "StringDataset.java",
        ]
    );

    let short = fs::read_to_string(out.join("ShortDataset.java")).unwrap();
    assert!(short.contains("// This is generated from DoubleDataset.java by dtgen\n\npackage "));
    assert!(short.contains("public interface ShortDataset extends Dataset { // CLASS_TYPE\n"));
    assert!(short.contains("\tshort[] getData(); // PRIM_TYPE\n"));
    assert!(short.contains("\tvoid setItem(short value, int... pos); // PRIM_TYPE\n"));
    assert!(short.contains("\tpublic ShortDataset getView();\n"));

    let string = fs::read_to_string(out.join("StringDataset.java")).unwrap();
    assert!(string.contains(" * Interface for dataset of Strings // PRIM_TYPE\n"));
    assert!(string.contains("\tString get(int i, int j); // PRIM_TYPE\n"));
}

#[test]
fn interface_master_needs_narrowed_requirements() {
    let dir = tempfile::tempdir().unwrap();
    let master = stage_master(dir.path(), INTERFACE_MASTER, "DoubleDataset.java");
    let out = dir.path().join("out");

    let err = run_generate(&GenerateConfig::new(&master, &out)).unwrap_err();
    let gen_error = err.downcast_ref::<GenError>().expect("generation error");
    assert!(matches!(
        gen_error,
        GenError::MissingToken { kind: TokenKind::Field(Field::StorageKind), .. }
    ));
    assert!(!out.exists());
}

#[test]
fn strip_base_class_on_interfaces() {
    let dir = tempfile::tempdir().unwrap();
    let master = stage_master(dir.path(), INTERFACE_MASTER, "DoubleDataset.java");
    let out = dir.path().join("out");

    let config = GenerateConfig {
        header: false,
        strip_base_class: true,
        required: Some(FieldSet::only(Field::PrimitiveName)),
        ..GenerateConfig::new(&master, &out)
    };
    run_generate(&config).unwrap();

    let string = fs::read_to_string(out.join("StringDataset.java")).unwrap();
    assert!(string.starts_with("/*-\n"));
    assert!(!string.contains("by dtgen"));
    assert!(string.contains("public interface StringDataset { // CLASS_TYPE"));
}

#[test]
fn failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("DoubleDatasetImpl.java");
    let text = fs::read_to_string(IMPL_MASTER).unwrap().replace("FLOAT64", "FLOAT");
    fs::write(&master, text).unwrap();
    let out = dir.path().join("out");

    let err = run_generate(&GenerateConfig::new(&master, &out)).unwrap_err();
    let gen_error = err.downcast_ref::<GenError>().expect("generation error");
    assert!(matches!(gen_error, GenError::MissingToken { token, .. } if token == "FLOAT64"));
    assert!(!out.exists());
}

#[test]
fn keep_going_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("DoubleDatasetImpl.java");
    let text = fs::read_to_string(IMPL_MASTER).unwrap().replace("%.8g", "%g");
    fs::write(&master, text).unwrap();
    let out = dir.path().join("out");

    let config = GenerateConfig {
        policy: FailurePolicy::KeepGoing,
        ..GenerateConfig::new(&master, &out)
    };
    let result = run_generate(&config).unwrap();
    assert!(result.has_errors());
    assert_eq!(result.failures.len(), 8);
    assert!(result.files.is_empty());
    assert!(listed(&out).is_empty());
}

#[test]
fn dry_run_plans_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let master = stage_master(dir.path(), IMPL_MASTER, "DoubleDatasetImpl.java");
    let out = dir.path().join("out");

    let config = GenerateConfig {
        dry_run: true,
        scope: SubstitutionScope::Marked,
        ..GenerateConfig::new(&master, &out)
    };
    let result = run_generate(&config).unwrap();
    assert_eq!(result.files.len(), 8);
    assert_eq!(result.files[0].path, out.join("FloatDatasetImpl.java"));
    assert!(result.files.iter().all(|file| file.bytes > 0));
    assert!(!out.exists());
}

#[test]
fn non_utf8_master_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("DoubleDatasetImpl.java");
    fs::write(&master, [0x63, 0x6c, 0xff, 0xfe]).unwrap();

    let err = read_master(&master).unwrap_err();
    assert!(matches!(err, GenError::MalformedInput { .. }));

    let err = read_master(&dir.path().join("absent.java")).unwrap_err();
    assert!(matches!(err, GenError::MalformedInput { .. }));
}

#[test]
fn explicit_catalog_overrides_inference() {
    let catalog = select_catalog(Some("complex"), "DoubleDatasetImpl.java").unwrap();
    assert_eq!(catalog.name(), "complex");
    let catalog = select_catalog(None, "Unrelated.java").unwrap();
    assert_eq!(catalog.name(), "scalar");
    assert!(select_catalog(Some("nope"), "DoubleDatasetImpl.java").is_err());
}

#[test]
fn summary_error_message() {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("DoubleDatasetImpl.java");
    fs::write(&master, "class DoubleDatasetImpl {}\n").unwrap();

    let err = run_generate(&GenerateConfig::new(&master, dir.path().join("out"))).unwrap_err();
    insta::assert_snapshot!(
        format!("{err:#}").replace(&master.display().to_string(), "<master>"),
        @r#"generate from <master>: missing storage kind token "FLOAT64" in master text (generating FloatDatasetImpl)"#
    );
}
