//! Plain-text navmesh format.
//!
//! The format written by Habitat-Sim navmesh exporters and read by exact
//! geodesic toolkits:
//!
//! ```text
//! <vertex_count> <face_count>
//! x y z          (vertex_count lines)
//! i j k          (face_count lines, 0-based vertex indices)
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use navmesh_types::{IndexedMesh, Vertex};

use crate::error::{IoError, IoResult};

/// Load a navmesh from a file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened ([`IoError::FileNotFound`], [`IoError::Io`])
/// - The header, a vertex or a face line is malformed
/// - A coordinate is not finite or a face index is out of range
/// - The file ends before the declared counts are reached
///
/// # Example
///
/// ```no_run
/// use navmesh_io::load_navmesh;
///
/// let mesh = load_navmesh("scene.navmesh.txt").unwrap();
/// println!("{} vertices, {} faces", mesh.vertices.len(), mesh.faces.len());
/// ```
pub fn load_navmesh<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    read_navmesh(BufReader::new(file))
}

/// Parse a navmesh from an in-memory string.
///
/// # Errors
///
/// Same as [`read_navmesh`].
pub fn parse_navmesh(text: &str) -> IoResult<IndexedMesh> {
    read_navmesh(text.as_bytes())
}

/// Read a navmesh from any buffered reader.
///
/// # Errors
///
/// Returns [`IoError::InvalidContent`] for malformed lines,
/// [`IoError::Truncated`] when records are missing and [`IoError::Io`]
/// for read failures.
pub fn read_navmesh<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut header: Option<(usize, usize)> = None;
    let mut mesh = IndexedMesh::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((vertex_count, face_count)) = header else {
            let [nv, nf] = parse_fields::<usize, 2>(trimmed, line_no, "header")?;
            mesh.vertices.reserve(nv);
            mesh.faces.reserve(nf);
            header = Some((nv, nf));
            continue;
        };

        if mesh.vertices.len() < vertex_count {
            let [x, y, z] = parse_fields::<f64, 3>(trimmed, line_no, "vertex")?;
            let vertex = Vertex::from_coords(x, y, z);
            if !vertex.is_finite() {
                return Err(IoError::invalid_content(
                    line_no,
                    "vertex coordinates must be finite",
                ));
            }
            mesh.vertices.push(vertex);
        } else if mesh.faces.len() < face_count {
            let face = parse_fields::<u32, 3>(trimmed, line_no, "face")?;
            if let Some(&bad) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(IoError::invalid_content(
                    line_no,
                    format!("face index {bad} out of range for {vertex_count} vertices"),
                ));
            }
            mesh.faces.push(face);
        } else {
            return Err(IoError::invalid_content(
                line_no,
                "unexpected data after the last face",
            ));
        }
    }

    let Some((vertex_count, face_count)) = header else {
        return Err(IoError::Truncated {
            section: "header",
            expected: 1,
            got: 0,
        });
    };
    if mesh.vertices.len() < vertex_count {
        return Err(IoError::Truncated {
            section: "vertices",
            expected: vertex_count,
            got: mesh.vertices.len(),
        });
    }
    if mesh.faces.len() < face_count {
        return Err(IoError::Truncated {
            section: "faces",
            expected: face_count,
            got: mesh.faces.len(),
        });
    }

    Ok(mesh)
}

/// Save a navmesh to a file.
///
/// Coordinates are written with full `f64` round-trip precision.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written, or if a face
/// references a missing vertex.
pub fn save_navmesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_navmesh(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a navmesh to any writer.
///
/// # Errors
///
/// Returns [`IoError::InvalidContent`] if a face references a missing vertex
/// and [`IoError::Io`] for write failures.
pub fn write_navmesh<W: Write>(mesh: &IndexedMesh, mut writer: W) -> IoResult<()> {
    if let Some(face) = mesh.first_invalid_face() {
        return Err(IoError::invalid_content(
            0,
            format!("face {face} references a missing vertex"),
        ));
    }

    writeln!(writer, "{} {}", mesh.vertices.len(), mesh.faces.len())?;
    for v in &mesh.vertices {
        let p = v.position;
        writeln!(writer, "{:?} {:?} {:?}", p.x, p.y, p.z)?;
    }
    for [a, b, c] in &mesh.faces {
        writeln!(writer, "{a} {b} {c}")?;
    }
    Ok(())
}

fn parse_fields<T, const N: usize>(line: &str, line_no: usize, what: &str) -> IoResult<[T; N]>
where
    T: std::str::FromStr + Copy + Default,
{
    let mut out = [T::default(); N];
    let mut tokens = line.split_whitespace();
    for (i, slot) in out.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| {
            IoError::invalid_content(line_no, format!("{what} has {i} fields, expected {N}"))
        })?;
        *slot = token.parse().map_err(|_| {
            IoError::invalid_content(line_no, format!("cannot parse {what} field '{token}'"))
        })?;
    }
    if tokens.next().is_some() {
        return Err(IoError::invalid_content(
            line_no,
            format!("{what} has more than {N} fields"),
        ));
    }
    Ok(out)
}
