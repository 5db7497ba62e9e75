use crate::clock::Clock;
use crate::format::Format;
use crate::result::Result;
use crate::utils;
use bzip2::write::BzEncoder;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tar::Builder;
use walkdir::WalkDir;
use xz2::write::XzEncoder;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Everything needed to produce one archive file.
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    /// Canonical path of the file or directory to archive
    pub source: PathBuf,
    /// Directory the archive file is written into
    pub dest_dir: PathBuf,
    pub format: Format,
    /// Filename prefix for the generated archive
    pub prefix: String,
    /// strftime pattern for the timestamp embedded in the filename
    pub timestamp_format: String,
}

/// Create one archive for the request and return its final path.
///
/// A directory source is archived recursively with the directory itself
/// as the top-level entry; a file source becomes the archive's sole
/// entry with no parent context. The timestamp is taken fresh per call,
/// so sources archived at different moments get different names.
pub fn build(request: &ArchiveRequest, clock: &dyn Clock) -> Result<PathBuf> {
    let timestamp = clock
        .now()
        .format(&request.timestamp_format)
        .to_string();
    let archive_name = format!(
        "{}_{}_{}.{}",
        request.prefix,
        utils::safe_base_name(&request.source)?,
        timestamp,
        request.format.extension()
    );
    let archive_path = request.dest_dir.join(archive_name);

    match request.format {
        Format::Zip => {
            create_zip_file(&request.source, &archive_path)?;
        }
        Format::Tar => {
            let file = File::create(&archive_path)?;
            append_entries(&request.source, Builder::new(file))?;
        }
        Format::GzTar => {
            let file = File::create(&archive_path)?;
            let enc = GzEncoder::new(file, Compression::default());
            append_entries(&request.source, Builder::new(enc))?.finish()?;
        }
        Format::BzTar => {
            let file = File::create(&archive_path)?;
            let enc = BzEncoder::new(file, bzip2::Compression::default());
            append_entries(&request.source, Builder::new(enc))?.finish()?;
        }
        Format::XzTar => {
            let file = File::create(&archive_path)?;
            let enc = XzEncoder::new(file, 6);
            append_entries(&request.source, Builder::new(enc))?.finish()?;
        }
    }

    Ok(archive_path)
}

/// Append the source to a tar builder and hand back the finished writer
/// so compressing encoders can flush their trailer.
fn append_entries<W: Write>(source: &Path, mut tar: Builder<W>) -> Result<W> {
    let root = utils::safe_base_name(source)?;

    if source.is_dir() {
        tar.append_dir_all(&root, source)?;
    } else {
        tar.append_path_with_name(source, &root)?;
    }

    Ok(tar.into_inner()?)
}

fn create_zip_file(source: &Path, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o755);

    let root = PathBuf::from(utils::safe_base_name(source)?);

    if source.is_dir() {
        let walkdir = WalkDir::new(source);
        let it = walkdir.into_iter().filter_map(|e| e.ok());

        for entry in it {
            let path = entry.path();
            let name = root.join(path.strip_prefix(source).unwrap());

            if path.is_file() {
                zip.start_file(name.to_string_lossy().to_string(), options)?;
                let mut f = File::open(path)?;
                let mut buffer = Vec::new();
                f.read_to_end(&mut buffer)?;
                zip.write_all(&buffer)?;
            } else {
                zip.add_directory(name.to_string_lossy().to_string(), options)?;
            }
        }
    } else {
        zip.start_file(root.to_string_lossy().to_string(), options)?;
        let mut f = File::open(source)?;
        let mut buffer = Vec::new();
        f.read_to_end(&mut buffer)?;
        zip.write_all(&buffer)?;
    }

    zip.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;
    use std::fs;
    use std::io::BufReader;

    fn fixed_clock() -> FixedClock {
        FixedClock(
            chrono::Local
                .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .unwrap(),
        )
    }

    fn request(source: PathBuf, dest_dir: PathBuf, format: Format) -> ArchiveRequest {
        ArchiveRequest {
            source,
            dest_dir,
            format,
            prefix: "backup".to_string(),
            timestamp_format: "%Y%m%d-%H%M%S".to_string(),
        }
    }

    fn tar_entry_names<R: Read>(reader: R) -> Vec<String> {
        let mut archive = tar::Archive::new(reader);
        archive
            .entries()
            .unwrap()
            .map(|e| {
                e.unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn zip_of_directory_keeps_directory_as_top_level_entry() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = tempdir.path().join("config");
        fs::create_dir(&config).unwrap();
        fs::write(config.join("a.txt"), b"alpha").unwrap();
        let dest = tempdir.path().join("backups");
        fs::create_dir(&dest).unwrap();

        let archive =
            build(&request(config, dest.clone(), Format::Zip), &fixed_clock()).unwrap();

        assert_eq!(
            archive,
            dest.join("backup_config_20260102-030405.zip")
        );

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut entry = zip.by_name("config/a.txt").unwrap();
        let mut contents = String::new();
        entry.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "alpha");
    }

    #[test]
    fn zip_of_file_has_single_entry_without_parents() {
        let tempdir = tempfile::tempdir().unwrap();
        let file = tempdir.path().join("server.js");
        fs::write(&file, b"module.exports = {};").unwrap();
        let dest = tempdir.path().join("backups");
        fs::create_dir(&dest).unwrap();

        let archive = build(&request(file, dest, Format::Zip), &fixed_clock()).unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 1);
        assert_eq!(zip.by_index(0).unwrap().name(), "server.js");
    }

    #[test]
    fn gztar_of_file_has_single_entry() {
        let tempdir = tempfile::tempdir().unwrap();
        let file = tempdir.path().join("server.js");
        fs::write(&file, b"module.exports = {};").unwrap();
        let dest = tempdir.path().join("backups");
        fs::create_dir(&dest).unwrap();

        let archive =
            build(&request(file, dest.clone(), Format::GzTar), &fixed_clock()).unwrap();

        assert_eq!(
            archive,
            dest.join("backup_server.js_20260102-030405.tar.gz")
        );

        let reader = flate2::read::GzDecoder::new(File::open(&archive).unwrap());
        assert_eq!(tar_entry_names(reader), vec!["server.js".to_string()]);
    }

    #[test]
    fn tar_of_directory_nests_entries_under_directory_name() {
        let tempdir = tempfile::tempdir().unwrap();
        let config = tempdir.path().join("config");
        fs::create_dir(&config).unwrap();
        fs::write(config.join("a.txt"), b"alpha").unwrap();
        fs::create_dir(config.join("sub")).unwrap();
        fs::write(config.join("sub").join("b.txt"), b"beta").unwrap();
        let dest = tempdir.path().join("backups");
        fs::create_dir(&dest).unwrap();

        let archive = build(&request(config, dest, Format::Tar), &fixed_clock()).unwrap();

        let names = tar_entry_names(BufReader::new(File::open(&archive).unwrap()));
        assert!(names.iter().all(|n| n.starts_with("config")));
        assert!(names.contains(&"config/a.txt".to_string()));
        assert!(names.contains(&"config/sub/b.txt".to_string()));
    }

    #[test]
    fn bztar_and_xztar_produce_readable_archives() {
        let tempdir = tempfile::tempdir().unwrap();
        let file = tempdir.path().join("notes.txt");
        fs::write(&file, b"remember").unwrap();
        let dest = tempdir.path().join("backups");
        fs::create_dir(&dest).unwrap();

        let bz = build(
            &request(file.clone(), dest.clone(), Format::BzTar),
            &fixed_clock(),
        )
        .unwrap();
        assert!(bz.to_string_lossy().ends_with(".tar.bz2"));
        let reader = bzip2::read::BzDecoder::new(File::open(&bz).unwrap());
        assert_eq!(tar_entry_names(reader), vec!["notes.txt".to_string()]);

        let xz = build(&request(file, dest, Format::XzTar), &fixed_clock()).unwrap();
        assert!(xz.to_string_lossy().ends_with(".tar.xz"));
        let reader = xz2::read::XzDecoder::new(File::open(&xz).unwrap());
        assert_eq!(tar_entry_names(reader), vec!["notes.txt".to_string()]);
    }

    #[test]
    fn source_is_left_untouched() {
        let tempdir = tempfile::tempdir().unwrap();
        let file = tempdir.path().join("data.txt");
        fs::write(&file, b"payload").unwrap();
        let dest = tempdir.path().join("backups");
        fs::create_dir(&dest).unwrap();

        build(&request(file.clone(), dest, Format::Zip), &fixed_clock()).unwrap();

        assert_eq!(fs::read(&file).unwrap(), b"payload");
    }
}
