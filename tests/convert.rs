//! End-to-end tests of the conversion driver

use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use rattler_conda_types::Platform;
use wheel2conda::{Configuration, ConvertError, convert_wheel};
use wheel2conda_package::PackageError;
use wheel2conda_wheel::WheelError;
use zip::write::SimpleFileOptions;

fn write_wheel(dir: &Path, wheel_metadata: &str, with_scripts: bool) -> PathBuf {
    let path = dir.join("hello-0.3-py3-none-any.whl");
    let mut writer = zip::ZipWriter::new(fs_err::File::create(&path).unwrap());

    let mut files = vec![
        ("hello/__init__.py", "def main():\n    print('hello')\n"),
        (
            "hello-0.3.dist-info/METADATA",
            "Metadata-Version: 2.1\nName: hello\nVersion: 0.3\nLicense: BSD\n",
        ),
        ("hello-0.3.dist-info/WHEEL", wheel_metadata),
        ("hello-0.3.dist-info/RECORD", "hello/__init__.py,,\n"),
    ];
    if with_scripts {
        files.push((
            "hello-0.3.dist-info/entry_points.txt",
            "[console_scripts]\nhello = hello:main\n",
        ));
    }

    for (name, content) in files {
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

const PY3_WHEEL: &str = "Wheel-Version: 1.0\nRoot-Is-Purelib: true\nTag: py3-none-any\n";

fn config(output_dir: &Path) -> Configuration {
    Configuration {
        output_dir: output_dir.to_path_buf(),
        timestamp: chrono::DateTime::from_timestamp(1_500_000_000, 0),
        compression_level: 1,
        ..Configuration::default()
    }
}

fn relative(paths: &[PathBuf], base: &Path) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            path.strip_prefix(base)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_convert_for_all_targets() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = write_wheel(dir.path(), PY3_WHEEL, true);

    let launchers = dir.path().join("launchers");
    fs_err::create_dir_all(&launchers).unwrap();
    fs_err::write(launchers.join("cli-64.exe"), "MZ").unwrap();
    fs_err::write(launchers.join("cli-32.exe"), "MZ").unwrap();

    let output = dir.path().join("output");
    let config = Configuration {
        launcher_dir: Some(launchers),
        ..config(&output)
    };
    let packages = convert_wheel(&wheel, &config).unwrap();

    let expected = ["linux-64", "linux-32", "osx-64", "win-64", "win-32"]
        .into_iter()
        .flat_map(|platform| {
            ["36", "35", "34"]
                .map(|python| format!("{platform}/hello-0.3-py{python}_0.tar.bz2"))
        })
        .collect::<Vec<_>>();
    assert_eq!(relative(&packages, &output), expected);
    assert!(packages.iter().all(|package| package.is_file()));

    // nothing is left behind besides the packages
    let leftovers = walkdir::WalkDir::new(&output)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .count();
    assert_eq!(leftovers, expected.len());

    let archive = fs_err::read(output.join("win-32/hello-0.3-py34_0.tar.bz2")).unwrap();
    let mut archive = tar::Archive::new(bzip2::read::BzDecoder::new(archive.as_slice()));
    let mut files = String::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        if entry.path().unwrap().as_ref() == Path::new("info/files") {
            entry.read_to_string(&mut files).unwrap();
        }
    }
    assert!(files.ends_with("Scripts/hello-script.py\nScripts/hello.exe"));
}

#[test]
fn test_convert_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = write_wheel(dir.path(), PY3_WHEEL, false);
    let output = dir.path().join("output");
    let config = Configuration {
        platforms: vec![Platform::Osx64],
        ..config(&output)
    };

    let first = convert_wheel(&wheel, &config).unwrap();
    let contents = fs_err::read(&first[0]).unwrap();
    let second = convert_wheel(&wheel, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs_err::read(&second[0]).unwrap(), contents);
}

#[test]
fn test_no_compatible_python() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = write_wheel(dir.path(), PY3_WHEEL, false);
    let output = dir.path().join("output");
    let config = Configuration {
        python_versions: vec!["2.7".to_string()],
        ..config(&output)
    };

    assert!(convert_wheel(&wheel, &config).unwrap().is_empty());

    // the platform directories are still laid out, but stay empty
    for platform in ["linux-64", "linux-32", "osx-64", "win-64", "win-32"] {
        let dir = output.join(platform);
        assert!(dir.is_dir(), "{platform} was not created");
        assert_eq!(fs_err::read_dir(&dir).unwrap().count(), 0);
    }
}

#[test]
fn test_platform_specific_wheel() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = write_wheel(
        dir.path(),
        "Wheel-Version: 1.0\nRoot-Is-Purelib: false\nTag: cp36-cp36m-linux_x86_64\n",
        false,
    );
    let output = dir.path().join("output");

    let err = convert_wheel(&wheel, &config(&output)).unwrap_err();
    assert!(matches!(err, ConvertError::Wheel(WheelError::PlatformSpecific)));
    assert!(!output.exists());
}

#[test]
fn test_windows_without_launchers() {
    let dir = tempfile::tempdir().unwrap();
    let wheel = write_wheel(dir.path(), PY3_WHEEL, true);
    let output = dir.path().join("output");
    let config = Configuration {
        python_versions: vec!["3.6".to_string()],
        ..config(&output)
    };

    let err = convert_wheel(&wheel, &config).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Package(PackageError::NoLauncherProvider)
    ));

    // the packages built before the failure are kept
    assert!(output.join("linux-64/hello-0.3-py36_0.tar.bz2").is_file());
    assert!(output.join("osx-64/hello-0.3-py36_0.tar.bz2").is_file());
    assert!(output.join("win-64").is_dir());
    assert!(!output.join("win-64").join("hello-0.3-py36_0.tar.bz2").exists());
    assert!(!output.join("win-32").exists());
}
