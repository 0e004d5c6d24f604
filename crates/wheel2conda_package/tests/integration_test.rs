//! Integration tests for wheel2conda_package

use std::{
    io::{Read, Write},
    path::Path,
};

use chrono::DateTime;
use rattler_conda_types::Platform;
use rstest::rstest;
use wheel2conda_markers::TargetEnvironment;
use wheel2conda_package::{
    LauncherDirectory, PackageBuilder, PackageConfig, PackageError, archive_file_name,
};
use wheel2conda_wheel::WheelContents;
use zip::write::SimpleFileOptions;

const METADATA: &str = "Metadata-Version: 2.1
Name: mypkg
Version: 1.0
Classifier: Programming Language :: Python :: 3
Classifier: License :: OSI Approved :: MIT License
Requires-Dist: requests (>=2.0)
Requires-Dist: enum34; python_version < '3.4'
Requires-Dist: colorama; sys_platform == 'win32'

The description, which is not part of the headers.
";

const WHEEL: &str = "Wheel-Version: 1.0
Generator: bdist_wheel (0.29.0)
Root-Is-Purelib: true
Tag: py2-none-any
Tag: py3-none-any
";

const RECORD: &str = "mypkg/__init__.py,sha256=qDELPlksFSwWLqsldfcO3h82HUM9qbRemTxcdjn1Jb8,16
mypkg/cli.py,,
mypkg-1.0.data/data/share/mypkg/x.txt,sha256=hNiYd_DUBB77a_kaFvAkjy_Vc-avBcGflr7bn4gveII,10
mypkg-1.0.dist-info/METADATA,,
mypkg-1.0.dist-info/WHEEL,,
mypkg-1.0.dist-info/entry_points.txt,,
mypkg-1.0.dist-info/RECORD,,
";

/// A wheel with a package, a data file and one console script
fn wheel_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("mypkg/__init__.py", "VERSION = '1.0'\n"),
        ("mypkg/cli.py", "def main():\n    print('hello')\n"),
        ("mypkg-1.0.data/data/share/mypkg/x.txt", "0123456789"),
        ("mypkg-1.0.dist-info/METADATA", METADATA),
        ("mypkg-1.0.dist-info/WHEEL", WHEEL),
        (
            "mypkg-1.0.dist-info/entry_points.txt",
            "[console_scripts]\nmytool = mypkg.cli:main\n",
        ),
        ("mypkg-1.0.dist-info/RECORD", RECORD),
    ]
}

fn open_wheel(dir: &Path, files: &[(&str, &str)]) -> WheelContents {
    let path = dir.join("mypkg-1.0-py2.py3-none-any.whl");
    let mut writer = zip::ZipWriter::new(fs_err::File::create(&path).unwrap());
    for (name, content) in files {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();

    WheelContents::from_wheel_file(&path).unwrap()
}

fn config() -> PackageConfig {
    PackageConfig {
        compression_level: 1,
        timestamp: DateTime::from_timestamp(1_500_000_000, 0),
    }
}

/// Archive path and contents of every entry, in archive order
fn read_archive(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = tar::Archive::new(bzip2::read::BzDecoder::new(archive));
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let mut entry = entry.unwrap();
            let path = entry.path().unwrap().to_string_lossy().to_string();
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).unwrap();
            (path, contents)
        })
        .collect()
}

fn file<'a>(entries: &'a [(String, Vec<u8>)], path: &str) -> &'a str {
    entries
        .iter()
        .find(|(name, _)| name == path)
        .map(|(_, contents)| std::str::from_utf8(contents).unwrap())
        .unwrap_or_else(|| panic!("{path} not found in archive"))
}

fn launcher_dir(dir: &Path) -> LauncherDirectory {
    let launchers = dir.join("launchers");
    fs_err::create_dir_all(&launchers).unwrap();
    fs_err::write(launchers.join("cli-64.exe"), b"MZ fake launcher").unwrap();
    fs_err::write(launchers.join("cli-32.exe"), b"MZ fake launcher").unwrap();
    LauncherDirectory::new(launchers)
}

#[test]
fn test_linux_package() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = open_wheel(dir.path(), &wheel_files());
    let target = TargetEnvironment::new("3.6", Platform::Linux64).unwrap();

    let archive = PackageBuilder::new(&wheel, &target, config())
        .build()
        .unwrap();
    let entries = read_archive(&archive);

    assert_eq!(
        entries
            .iter()
            .map(|(path, _)| path.as_str())
            .collect::<Vec<_>>(),
        [
            "lib/python3.6/site-packages/mypkg/__init__.py",
            "lib/python3.6/site-packages/mypkg/cli.py",
            "lib/python3.6/site-packages/mypkg-1.0.dist-info/METADATA",
            "lib/python3.6/site-packages/mypkg-1.0.dist-info/WHEEL",
            "lib/python3.6/site-packages/mypkg-1.0.dist-info/entry_points.txt",
            "share/mypkg/x.txt",
            "bin/mytool",
            "lib/python3.6/site-packages/mypkg-1.0.dist-info/RECORD",
            "info/index.json",
            "info/has_prefix",
            "info/files",
        ]
    );

    let script = file(&entries, "bin/mytool");
    assert!(script.starts_with("#!/opt/anaconda1anaconda2anaconda3/bin/python\n"));
    assert!(script.contains("from mypkg.cli import main"));

    insta::assert_snapshot!(file(&entries, "info/files"), @r"
    lib/python3.6/site-packages/mypkg/__init__.py
    lib/python3.6/site-packages/mypkg/cli.py
    lib/python3.6/site-packages/mypkg-1.0.dist-info/METADATA
    lib/python3.6/site-packages/mypkg-1.0.dist-info/RECORD
    lib/python3.6/site-packages/mypkg-1.0.dist-info/WHEEL
    lib/python3.6/site-packages/mypkg-1.0.dist-info/entry_points.txt
    share/mypkg/x.txt
    bin/mytool
    ");

    assert_eq!(
        file(&entries, "info/has_prefix"),
        "/opt/anaconda1anaconda2anaconda3 text bin/mytool"
    );

    insta::assert_snapshot!(file(&entries, "info/index.json"), @r#"
    {
      "arch": "x86_64",
      "build": "py36_0",
      "build_number": 0,
      "depends": [
        "python 3.6*",
        "requests >=2.0"
      ],
      "license": "MIT",
      "name": "mypkg",
      "platform": "linux",
      "subdir": "linux-64",
      "version": "1.0"
    }
    "#);

    insta::assert_snapshot!(
        file(&entries, "lib/python3.6/site-packages/mypkg-1.0.dist-info/RECORD"),
        @r"
    mypkg/__init__.py,sha256=qDELPlksFSwWLqsldfcO3h82HUM9qbRemTxcdjn1Jb8,16
    mypkg/cli.py,,
    ../../../share/mypkg/x.txt,sha256=hNiYd_DUBB77a_kaFvAkjy_Vc-avBcGflr7bn4gveII,10
    mypkg-1.0.dist-info/METADATA,,
    mypkg-1.0.dist-info/WHEEL,,
    mypkg-1.0.dist-info/entry_points.txt,,
    mypkg-1.0.dist-info/RECORD,,
    ../../../bin/mytool,sha256=WuEK0FBnGRGpchA0UkbSVf7N4CZjcdHXqjR5Vzxlc3c,111
    "
    );

    wheel.close().unwrap();
}

#[test]
fn test_windows_package() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = open_wheel(dir.path(), &wheel_files());
    let launchers = launcher_dir(dir.path());
    let target = TargetEnvironment::new("2.7", Platform::Win32).unwrap();

    let archive = PackageBuilder::new(&wheel, &target, config())
        .with_launchers(&launchers)
        .build()
        .unwrap();
    let entries = read_archive(&archive);

    insta::assert_snapshot!(file(&entries, "info/files"), @r"
    Lib/site-packages/mypkg/__init__.py
    Lib/site-packages/mypkg/cli.py
    Lib/site-packages/mypkg-1.0.dist-info/METADATA
    Lib/site-packages/mypkg-1.0.dist-info/RECORD
    Lib/site-packages/mypkg-1.0.dist-info/WHEEL
    Lib/site-packages/mypkg-1.0.dist-info/entry_points.txt
    share/mypkg/x.txt
    Scripts/mytool-script.py
    Scripts/mytool.exe
    ");

    assert_eq!(
        file(&entries, "info/has_prefix"),
        "/opt/anaconda1anaconda2anaconda3 text Scripts/mytool-script.py"
    );
    assert_eq!(file(&entries, "Scripts/mytool.exe"), "MZ fake launcher");
    assert!(file(&entries, "Scripts/mytool-script.py").contains("from mypkg.cli import main"));

    let index: serde_json::Value =
        serde_json::from_str(file(&entries, "info/index.json")).unwrap();
    assert_eq!(index["arch"], "x86");
    assert_eq!(index["subdir"], "win-32");
    assert_eq!(index["build"], "py27_0");
    assert_eq!(
        index["depends"],
        serde_json::json!(["python 2.7*", "requests >=2.0", "enum34", "colorama"])
    );

    let record = file(&entries, "Lib/site-packages/mypkg-1.0.dist-info/RECORD");
    assert!(record.contains("\n../../share/mypkg/x.txt,"));
    assert!(record.ends_with(
        "../../Scripts/mytool-script.py,sha256=WuEK0FBnGRGpchA0UkbSVf7N4CZjcdHXqjR5Vzxlc3c,111\n\
         ../../Scripts/mytool.exe,sha256=jfkQUacMf0HAqbGO9FYGdTUNy2ZDmO76ydJou8CLaKc,16\n"
    ));
}

#[test]
fn test_windows_package_without_launchers() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = open_wheel(dir.path(), &wheel_files());
    let target = TargetEnvironment::new("3.6", Platform::Win64).unwrap();

    let err = PackageBuilder::new(&wheel, &target, config())
        .build()
        .unwrap_err();
    assert!(matches!(err, PackageError::NoLauncherProvider));
}

#[test]
fn test_reproducible_build() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = open_wheel(dir.path(), &wheel_files());
    let launchers = launcher_dir(dir.path());

    for platform in [Platform::Osx64, Platform::Win64] {
        let target = TargetEnvironment::new("3.5", platform).unwrap();
        let build = || {
            PackageBuilder::new(&wheel, &target, config())
                .with_launchers(&launchers)
                .build()
                .unwrap()
        };
        assert_eq!(build(), build());
    }
}

#[rstest]
#[case("mytool = mypkg.cli\n")]
#[case("mytool = mypkg:cli:main\n")]
fn test_bad_entry_point(#[case] console_scripts: &str) {
    let dir = tempfile::tempdir().unwrap();
    let entry_points = format!("[console_scripts]\n{console_scripts}");
    let mut files = wheel_files();
    files.retain(|(name, _)| !name.ends_with("entry_points.txt"));
    files.push(("mypkg-1.0.dist-info/entry_points.txt", &entry_points));

    let wheel = open_wheel(dir.path(), &files);
    let target = TargetEnvironment::new("3.6", Platform::Linux64).unwrap();
    let err = PackageBuilder::new(&wheel, &target, config())
        .build()
        .unwrap_err();
    assert!(matches!(err, PackageError::BadEntryPoint { name, .. } if name == "mytool"));
}

#[test]
fn test_unsupported_data_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = wheel_files();
    files.push(("mypkg-1.0.data/scripts/tool", "#!python\n"));

    let wheel = open_wheel(dir.path(), &files);
    let target = TargetEnvironment::new("3.6", Platform::Linux64).unwrap();
    let err = PackageBuilder::new(&wheel, &target, config())
        .build()
        .unwrap_err();
    assert!(matches!(err, PackageError::UnsupportedDataLayout(name) if name == "scripts"));
}

#[test]
fn test_wheel_without_scripts() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = wheel_files();
    files.retain(|(name, _)| !name.ends_with("entry_points.txt") && !name.contains(".data/"));

    let wheel = open_wheel(dir.path(), &files);
    let target = TargetEnvironment::new("3.4", Platform::Win64).unwrap();

    // no console scripts, so no launchers are needed
    let archive = PackageBuilder::new(&wheel, &target, config())
        .build()
        .unwrap();
    let entries = read_archive(&archive);
    assert_eq!(file(&entries, "info/has_prefix"), "");
    assert_eq!(
        archive_file_name(wheel.name(), wheel.version(), &target),
        "mypkg-1.0-py34_0.tar.bz2"
    );
}

#[test]
fn test_wheel_without_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = wheel_files();
    files.retain(|(name, _)| !name.ends_with("RECORD"));

    let wheel = open_wheel(dir.path(), &files);
    let target = TargetEnvironment::new("3.6", Platform::Linux64).unwrap();
    let archive = PackageBuilder::new(&wheel, &target, config())
        .build()
        .unwrap();
    let entries = read_archive(&archive);

    // only the generated script is listed
    assert_eq!(
        file(&entries, "lib/python3.6/site-packages/mypkg-1.0.dist-info/RECORD"),
        "../../../bin/mytool,sha256=WuEK0FBnGRGpchA0UkbSVf7N4CZjcdHXqjR5Vzxlc3c,111\n"
    );

    insta::assert_snapshot!(file(&entries, "info/files"), @r"
    lib/python3.6/site-packages/mypkg/__init__.py
    lib/python3.6/site-packages/mypkg/cli.py
    lib/python3.6/site-packages/mypkg-1.0.dist-info/METADATA
    lib/python3.6/site-packages/mypkg-1.0.dist-info/WHEEL
    lib/python3.6/site-packages/mypkg-1.0.dist-info/entry_points.txt
    share/mypkg/x.txt
    bin/mytool
    lib/python3.6/site-packages/mypkg-1.0.dist-info/RECORD
    ");
}
