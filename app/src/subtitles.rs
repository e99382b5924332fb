use std::{io::Read, path::Path};

use subclip_core::{timings::TimingError, PlaceholderRule, TimeRange};

fn decode(tpath: &Path, v: Vec<u8>) -> String {
    match String::from_utf8(v) {
        Ok(s) => s,
        Err(e) => {
            let v = e.into_bytes();
            // SRT files are WINDOWS_1252 by default, but there is no requirement, so who knows
            let (text, encoding, replacements) = encoding_rs::WINDOWS_1252.decode(v.as_slice());
            if replacements {
                log::warn!(
                    "could not decode {:?} accurately with {}",
                    tpath,
                    encoding.name()
                );
            }
            text.into_owned()
        }
    }
}

/// Read a subtitle file to a string, falling back to WINDOWS-1252 when the
/// bytes are not UTF-8.
pub fn read_subtitles<P: AsRef<Path>>(tpath: P) -> Result<String, TimingError> {
    let tpath = tpath.as_ref();
    let read_err = |source| TimingError::Read {
        path: tpath.to_path_buf(),
        source,
    };
    let mut f = std::fs::File::open(tpath).map_err(read_err)?;
    let mut v = Vec::new();
    f.read_to_end(&mut v).map_err(read_err)?;
    Ok(decode(tpath, v))
}

pub fn load_time_ranges<P: AsRef<Path>>(
    tpath: P,
    rule: PlaceholderRule,
) -> Result<Vec<TimeRange>, TimingError> {
    let tpath = tpath.as_ref();
    let content = read_subtitles(tpath)?;
    let ranges = subclip_core::parse_time_ranges(&content, rule)?;
    log::debug!("{} time ranges in {:?}", ranges.len(), tpath);
    Ok(ranges)
}
