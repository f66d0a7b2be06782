pub mod dist;
pub mod install;
pub mod metadata;
pub mod pip;
pub mod runtime;

/// Test fixtures for building distribution archives in memory.
#[cfg(test)]
pub mod test_utils {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    /// Build a gzipped tarball holding the given (path, contents) entries.
    pub fn sdist_bytes(files: &[(&str, &str)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_path(name).unwrap();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append(&header, content.as_bytes()).unwrap();
        }
        let tar = builder.into_inner().unwrap();

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tar).unwrap();
        encoder.finish().unwrap()
    }

    /// Build a wheel-style zip holding the given (path, contents) entries.
    pub fn wheel_bytes(files: &[(&str, &str)]) -> Vec<u8> {
        use zip::CompressionMethod;
        use zip::ZipWriter;
        use zip::write::FileOptions;

        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options: FileOptions<()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, content) in files {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    /// A minimal PKG-INFO style header block.
    pub fn pkg_info(name: &str, version: &str) -> String {
        format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\nSummary: fixture\n")
    }
}
