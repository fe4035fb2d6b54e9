/// Wavefront OBJ reader for `v` and `f` records
///
/// The reader is strict: the first malformed vertex or face line rejects the
/// whole file. Lines starting with any other keyword are ignored.
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::debug;
use nom::{
    character::complete::{char, i32 as signed},
    combinator::{all_consuming, opt, rest},
    number::complete::float,
    sequence::{pair, terminated},
    IResult,
};

use crate::error::{LoadError, LoadResult};
use crate::geometry::{Face, Mesh, Vertex};

/// Load an OBJ file from disk.
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let mut mesh = Mesh::new();
    mesh.load(path)?;
    Ok(mesh)
}

/// Parse OBJ data from any buffered reader.
pub fn parse_obj<R: BufRead>(reader: R) -> LoadResult<Mesh> {
    let mut mesh = Mesh::new();
    mesh.read_from(reader, Path::new("<stream>"))?;
    Ok(mesh)
}

impl Mesh {
    /// Replace the contents of this mesh with the model stored at `path`.
    ///
    /// The mesh is cleared before the file is opened and stays empty if the
    /// load fails for any reason.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        let path = path.as_ref();
        self.clear();

        let file = File::open(path).map_err(|source| LoadError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        self.read_from(BufReader::new(file), path)
    }

    /// Replace the contents of this mesh with OBJ data read from `reader`.
    /// `source` only labels read errors.
    pub fn read_from<R: BufRead>(&mut self, reader: R, source: &Path) -> LoadResult<()> {
        self.clear();
        let result = self.read_lines(reader, source);
        if result.is_err() {
            self.clear();
        }
        result
    }

    fn read_lines<R: BufRead>(&mut self, reader: R, source: &Path) -> LoadResult<()> {
        for (number, line) in reader.lines().enumerate() {
            let number = number + 1;
            let line = line.map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => LoadError::corrupted(number, "line is not valid UTF-8"),
                _ => LoadError::ReadError {
                    path: source.to_path_buf(),
                    source: e,
                },
            })?;
            self.read_line(&line, number)?;
        }

        if self.is_empty() {
            return Err(LoadError::EmptyFile);
        }

        debug!(
            "parsed {} vertices, {} faces, {} edges from {}",
            self.vertex_count(),
            self.face_count(),
            self.edge_count(),
            source.display()
        );
        Ok(())
    }

    fn read_line(&mut self, line: &str, number: usize) -> LoadResult<()> {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let vertex = parse_vertex(tokens).map_err(|reason| LoadError::corrupted(number, reason))?;
                self.push_vertex(vertex);
            }
            Some("f") => {
                let face = parse_face(tokens, self.vertex_count())
                    .map_err(|reason| LoadError::corrupted(number, reason))?;
                self.push_face(face);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Read `x y z` from the tokens after `v`. Extra components such as `w` are ignored.
fn parse_vertex<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<Vertex, String> {
    let mut coords = [0.0f32; 3];
    for (axis, coord) in ["x", "y", "z"].iter().zip(coords.iter_mut()) {
        let token = tokens
            .next()
            .ok_or_else(|| format!("vertex is missing its {axis} coordinate"))?;
        *coord = coordinate(token)
            .ok()
            .map(|(_, value)| value)
            .filter(|value| value.is_finite())
            .ok_or_else(|| format!("invalid {axis} coordinate '{token}'"))?;
    }
    Ok(Vertex::new(coords[0], coords[1], coords[2]))
}

fn coordinate(token: &str) -> IResult<&str, f32> {
    all_consuming(float)(token)
}

/// Read the vertex references after `f` and resolve them against the
/// vertices seen so far.
fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    vertex_count: usize,
) -> Result<Face, String> {
    let mut indices = Vec::new();
    for token in tokens {
        let (_, reference) =
            vertex_reference(token).map_err(|_| format!("invalid vertex reference '{token}'"))?;
        let index = resolve_index(reference, vertex_count).ok_or_else(|| {
            format!("vertex reference {reference} is out of range ({vertex_count} vertices read so far)")
        })?;
        indices.push(index);
    }

    if indices.len() < 3 {
        return Err(format!("face has {} vertices, at least 3 required", indices.len()));
    }
    Ok(Face::new(indices))
}

/// `v`, `v/vt`, `v//vn` or `v/vt/vn`. Only the leading vertex reference is kept.
fn vertex_reference(token: &str) -> IResult<&str, i32> {
    all_consuming(terminated(signed, opt(pair(char('/'), rest))))(token)
}

/// Positive references are 1-based; negative ones count back from the last vertex read.
fn resolve_index(reference: i32, vertex_count: usize) -> Option<usize> {
    let index = if reference < 0 {
        vertex_count as i64 + i64::from(reference)
    } else {
        i64::from(reference) - 1
    };

    if index < 0 || index >= vertex_count as i64 {
        return None;
    }
    Some(index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadStatus;
    use crate::geometry::Edge;
    use std::io::Write;

    fn parse(text: &str) -> LoadResult<Mesh> {
        parse_obj(text.as_bytes())
    }

    #[test]
    fn test_parse_triangle() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces()[0].indices, vec![0, 1, 2]);
        assert_eq!(
            mesh.edges(),
            &[Edge::new(0, 1), Edge::new(1, 2), Edge::new(0, 2)]
        );
        assert_eq!(mesh.vertices()[1], Vertex::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ignores_other_records() {
        let text = "# comment\no cube\nvn 0 0 1\nvt 0.5 0.5\nusemtl steel\n\n\
                    v -1.5 2e1 .25\nv 1 0 0 1.0\nv 0 1 0\ns off\nf 1/1/1 2//1 3/2\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices()[0], Vertex::new(-1.5, 20.0, 0.25));
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_negative_references() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf -4 -3 -2 -1\n").unwrap();
        assert_eq!(mesh.faces()[0].indices, vec![0, 1, 2, 3]);
        assert_eq!(mesh.edge_count(), 4);
        assert!(mesh.edges().contains(&Edge::new(0, 3)));
    }

    #[test]
    fn test_negative_reference_is_relative_to_vertices_so_far() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -1 -2 -3\nv 5 5 5\nf -1 1 2\n").unwrap();
        assert_eq!(mesh.faces()[0].indices, vec![2, 1, 0]);
        assert_eq!(mesh.faces()[1].indices, vec![3, 0, 1]);
    }

    #[test]
    fn test_corrupted_vertex() {
        for text in ["v 1 2\nf 1 1 1\n", "v 1 two 3\n", "v 1 2 3abc\n"] {
            let err = parse(text).unwrap_err();
            assert_eq!(err.status(), LoadStatus::FileCorrupted, "{text:?}");
        }
    }

    #[test]
    fn test_non_finite_vertex() {
        let triangle = "v 1 0 0\nv 0 1 0\nf 1 2 3\n";
        for first in ["v nan 0 0", "v 0 inf 0", "v 0 0 -inf", "v infinity 0 0", "v 0 0 1e39"] {
            let text = format!("{first}\n{triangle}");
            let err = parse(&text).unwrap_err();
            assert_eq!(err.status(), LoadStatus::FileCorrupted, "{text:?}");
        }
    }

    #[test]
    fn test_exponent_coordinates() {
        let mesh = parse("v 1e2 -2.5E-1 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.vertices()[0].position.x, 100.0);
        assert_eq!(mesh.vertices()[0].position.y, -0.25);
    }

    #[test]
    fn test_bare_vertex_record() {
        let err = parse("v 1 2 3 4\nv\n").unwrap_err();
        assert_eq!(err.status(), LoadStatus::FileCorrupted);
    }

    #[test]
    fn test_corrupted_face() {
        let cases = [
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2\n",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -4 1 2\n",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 x\n",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 99999999999\n",
            "f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n",
        ];
        for text in cases {
            let err = parse(text).unwrap_err();
            assert_eq!(err.status(), LoadStatus::FileCorrupted, "{text:?}");
        }
    }

    #[test]
    fn test_error_reports_line() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\n\nf 1 2 7\n").unwrap_err();
        match err {
            LoadError::FileCorrupted { line, .. } => assert_eq!(line, 5),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("").unwrap_err().status(), LoadStatus::EmptyFile);
        assert_eq!(
            parse("v 0 0 0\nv 1 1 1\n").unwrap_err().status(),
            LoadStatus::EmptyFile
        );
        assert_eq!(parse("# nothing\n").unwrap_err().status(), LoadStatus::EmptyFile);
    }

    #[test]
    fn test_failed_load_clears_mesh() {
        let mut mesh = Mesh::cube(1.0);
        let err = mesh
            .read_from("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nv bad\n".as_bytes(), Path::new("test"))
            .unwrap_err();
        assert_eq!(err.status(), LoadStatus::FileCorrupted);
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.edge_count(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut mesh = Mesh::cube(1.0);
        let err = mesh.load(dir.path().join("missing.obj")).unwrap_err();
        assert_eq!(err.status(), LoadStatus::ReadError);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_load_replaces_previous_mesh() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3").unwrap();

        let mut mesh = Mesh::cube(1.0);
        mesh.load(file.path()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.edge_count(), 3);
    }

    #[test]
    fn test_invalid_utf8_is_corrupted() {
        let bytes: &[u8] = b"v 0 0 0\nv \xff\xfe 0 0\n";
        assert_eq!(parse_obj(bytes).unwrap_err().status(), LoadStatus::FileCorrupted);
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index(1, 3), Some(0));
        assert_eq!(resolve_index(3, 3), Some(2));
        assert_eq!(resolve_index(4, 3), None);
        assert_eq!(resolve_index(0, 3), None);
        assert_eq!(resolve_index(-1, 3), Some(2));
        assert_eq!(resolve_index(-3, 3), Some(0));
        assert_eq!(resolve_index(-4, 3), None);
    }
}
