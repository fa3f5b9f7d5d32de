use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::{LineCodec, Repository, RepositoryStore};

// TextFileRepository keeps one collection in a text file, one encoded record per line.
#[derive(Debug)]
pub struct TextFileRepository<Entity> {
    path: PathBuf,
    store: RepositoryStore,
    _entity: PhantomData<fn() -> Entity>,
}

impl<Entity: LineCodec> TextFileRepository<Entity> {
    pub fn new(path: &Path, store: RepositoryStore) -> Self {
        Self {
            path: path.to_path_buf(),
            store,
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

impl<Entity: LineCodec> Repository<Entity> for TextFileRepository<Entity> {
    fn load_all(&self) -> LibraryResult<Vec<Entity>> {
        let lines = read_lines(&self.path)?;
        let mut records = Vec::with_capacity(lines.len());
        let mut skipped = 0;
        for (line_no, line) in lines.iter().enumerate() {
            match Entity::decode(line) {
                Some(record) => records.push(record),
                None => {
                    skipped += 1;
                    warn!(path = %self.path.display(), line_no = line_no + 1, "skipping malformed record");
                }
            }
        }
        info!(path = %self.path.display(), loaded = records.len(), skipped, "loaded records");
        Ok(records)
    }

    fn save_all(&self, entities: &[Entity]) -> LibraryResult<usize> {
        let lines: Vec<String> = entities.iter().map(Entity::encode).collect();
        let written = write_lines(&self.path, &lines, self.store.is_atomic())?;
        debug!(path = %self.path.display(), written, "saved records");
        Ok(written)
    }
}

// read_lines returns the non-blank lines of a file, or nothing when the file does not exist.
// Invalid UTF-8 is replaced rather than failing the whole file.
pub fn read_lines(path: &Path) -> LibraryResult<Vec<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
        Err(err) => return Err(LibraryError::from(err)),
    };
    let mut reader = BufReader::new(file);
    let mut lines = vec![];
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        lines.push(line.to_string());
    }
    Ok(lines)
}

// write_lines overwrites the file with newline-terminated lines.
pub fn write_lines(path: &Path, lines: &[String], atomic: bool) -> LibraryResult<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if atomic {
        let tmp = temp_path(path)?;
        if let Err(err) = write_file(&tmp, lines, true) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }
        fs::rename(&tmp, path)?;
    } else {
        write_file(path, lines, false)?;
    }
    Ok(lines.len())
}

fn write_file(path: &Path, lines: &[String], sync: bool) -> LibraryResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    if sync {
        writer.get_ref().sync_all()?;
    }
    Ok(())
}

fn temp_path(path: &Path) -> LibraryResult<PathBuf> {
    let name = path.file_name().ok_or_else(|| LibraryError::runtime(
        format!("no file name in {}", path.display()).as_str(), None))?;
    let mut tmp = name.to_os_string();
    tmp.push(".tmp");
    Ok(path.with_file_name(tmp))
}
