use crate::classbook::Snapshot;
use anyhow::{anyhow, bail, Context};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;
use uuid::Uuid;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const MANIFEST_ENTRY: &str = "manifest.json";
const STATE_ENTRY: &str = "state/classbook.json";
const ZIP_LOCAL_HEADER: [u8; 4] = *b"PK\x03\x04";
pub const BUNDLE_FORMAT_V1: &str = "rollbook-snapshot-v1";
pub const PLAIN_JSON_FORMAT: &str = "plain-json";

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub bundle_id: String,
    pub bundle_format: String,
    pub entry_count: usize,
    pub state_sha256: String,
}

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub bundle_format_detected: String,
    pub snapshot: Snapshot,
}

/// Writes `snapshot` as a zip bundle: a manifest carrying the SHA-256 of
/// the state entry, then the state itself as JSON.
pub fn export_snapshot_bundle(snapshot: &Snapshot, out_path: &Path) -> anyhow::Result<ExportSummary> {
    let state_bytes =
        serde_json::to_vec_pretty(snapshot).context("failed to serialize classbook state")?;
    let summary = ExportSummary {
        bundle_id: Uuid::new_v4().to_string(),
        bundle_format: BUNDLE_FORMAT_V1.to_string(),
        entry_count: 2,
        state_sha256: sha256_hex(&state_bytes),
    };
    let manifest = serde_json::to_vec_pretty(&json!({
        "format": BUNDLE_FORMAT_V1,
        "version": 1,
        "bundleId": summary.bundle_id,
        "appVersion": env!("CARGO_PKG_VERSION"),
        "exportedAt": chrono::Utc::now().to_rfc3339(),
        "stateSha256": summary.state_sha256,
    }))
    .context("failed to serialize manifest")?;

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let out_file = File::create(out_path)
        .with_context(|| format!("failed to create bundle {}", out_path.display()))?;
    let mut zip = ZipWriter::new(out_file);
    write_entry(&mut zip, MANIFEST_ENTRY, &manifest)?;
    write_entry(&mut zip, STATE_ENTRY, &state_bytes)?;
    zip.finish().context("failed to finalize zip bundle")?;

    Ok(summary)
}

/// Reads a snapshot bundle, or a bare JSON snapshot file.
///
/// Bundles must name the v1 format and carry a `stateSha256` matching the
/// state entry.
pub fn import_snapshot_bundle(in_path: &Path) -> anyhow::Result<ImportSummary> {
    if !starts_with_zip_header(in_path)? {
        let text = std::fs::read_to_string(in_path)
            .with_context(|| format!("failed to read snapshot {}", in_path.display()))?;
        let snapshot: Snapshot =
            serde_json::from_str(&text).context("snapshot file is not valid classbook JSON")?;
        return Ok(ImportSummary {
            bundle_format_detected: PLAIN_JSON_FORMAT.to_string(),
            snapshot,
        });
    }

    let in_file = File::open(in_path)
        .with_context(|| format!("failed to open bundle {}", in_path.display()))?;
    let mut archive = ZipArchive::new(in_file).context("invalid zip archive")?;

    let manifest: serde_json::Value =
        serde_json::from_slice(&read_entry(&mut archive, MANIFEST_ENTRY)?)
            .context("manifest.json is invalid JSON")?;
    let format = manifest.get("format").and_then(|v| v.as_str()).unwrap_or("");
    if format != BUNDLE_FORMAT_V1 {
        bail!("unsupported bundle format: {}", format);
    }
    let expected = manifest
        .get("stateSha256")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("manifest.json has no stateSha256"))?;

    let state_bytes = read_entry(&mut archive, STATE_ENTRY)?;
    let actual = sha256_hex(&state_bytes);
    if !actual.eq_ignore_ascii_case(expected) {
        bail!(
            "state checksum mismatch: manifest {}, entry {}",
            expected,
            actual
        );
    }

    let snapshot: Snapshot =
        serde_json::from_slice(&state_bytes).context("state entry is not valid classbook JSON")?;
    Ok(ImportSummary {
        bundle_format_detected: BUNDLE_FORMAT_V1.to_string(),
        snapshot,
    })
}

fn write_entry<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(name, opts)
        .with_context(|| format!("failed to start bundle entry {}", name))?;
    zip.write_all(bytes)
        .with_context(|| format!("failed to write bundle entry {}", name))
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    archive
        .by_name(name)
        .with_context(|| format!("bundle missing {}", name))?
        .read_to_end(&mut bytes)
        .with_context(|| format!("failed to read bundle entry {}", name))?;
    Ok(bytes)
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn starts_with_zip_header(path: &Path) -> anyhow::Result<bool> {
    let file = File::open(path)
        .with_context(|| format!("failed to open input file {}", path.display()))?;
    let mut head = Vec::with_capacity(ZIP_LOCAL_HEADER.len());
    file.take(ZIP_LOCAL_HEADER.len() as u64)
        .read_to_end(&mut head)
        .context("failed to read file signature")?;
    Ok(head == ZIP_LOCAL_HEADER)
}
