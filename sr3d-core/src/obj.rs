/// Wavefront OBJ reader (`v`, `vt`, `vn` and `f` directives)
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nom::{
    character::complete::{char, i32 as index},
    combinator::{all_consuming, opt},
    number::complete::double,
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Face, Mesh, VertexIndex, NO_INDEX};
use crate::math::{Vec2, Vec3};

/// Load a mesh from an OBJ file.
///
/// Loading is all-or-nothing: the first malformed line fails the whole file
/// with its line number and content.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let mesh = File::open(path)
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|file| read_obj(BufReader::new(file)))
        .map_err(|err| {
            log::error!("{}: {}", path.display(), err);
            err
        })?;
    log::info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Parse OBJ text held in memory
pub fn parse_obj(input: &str) -> Result<Mesh> {
    read_obj(input.as_bytes())
}

/// Parse OBJ text line by line from any buffered reader
pub fn read_obj<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut mesh = Mesh::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.map_err(|source| Error::Read {
            line: line_number,
            source,
        })?;

        if let Err(reason) = parse_line(&line, &mut mesh) {
            return Err(Error::Parse {
                line: line_number,
                content: line,
                reason,
            });
        }
    }

    Ok(mesh)
}

fn parse_line(line: &str, mesh: &mut Mesh) -> std::result::Result<(), String> {
    let without_comment = match line.find('#') {
        Some(start) => &line[..start],
        None => line,
    };
    let tokens: Vec<&str> = without_comment.split_whitespace().collect();

    let Some((&directive, args)) = tokens.split_first() else {
        return Ok(());
    };

    match directive {
        "v" => mesh.add_vertex(parse_vec3(args)?),
        "vt" => mesh.add_texture_uv(parse_vec2(args)?),
        "vn" => mesh.add_normal(parse_vec3(args)?),
        "f" => {
            for face in parse_face(args)? {
                mesh.add_face(face);
            }
        }
        _ => log::trace!("skipping unsupported directive `{directive}`"),
    }

    Ok(())
}

fn parse_vec3(args: &[&str]) -> std::result::Result<Vec3, String> {
    match args {
        [x, y, z] => Ok(Vec3::new(number(x)?, number(y)?, number(z)?)),
        _ => Err(format!("expected 3 coordinates, found {}", args.len())),
    }
}

fn parse_vec2(args: &[&str]) -> std::result::Result<Vec2, String> {
    match args {
        [x, y] => Ok(Vec2::new(number(x)?, number(y)?)),
        _ => Err(format!("expected 2 coordinates, found {}", args.len())),
    }
}

fn number(token: &str) -> std::result::Result<f64, String> {
    all_consuming(double)(token)
        .map(|(_, value)| value)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| format!("invalid number `{token}`"))
}

/// Triangles for a face line; quads are split into a fan of two
fn parse_face(args: &[&str]) -> std::result::Result<Vec<Face>, String> {
    if args.len() != 3 && args.len() != 4 {
        return Err(format!("expected 3 or 4 face corners, found {}", args.len()));
    }

    // One slash anywhere makes every corner of the face a full index group
    let complex = args.iter().any(|token| token.contains('/'));

    let corners = args
        .iter()
        .map(|token| {
            if complex {
                corner(token)
            } else {
                bare_corner(token)
            }
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut faces = vec![Face::new(corners[0], corners[1], corners[2])];
    if let Some(&fourth) = corners.get(3) {
        faces.push(Face::new(corners[0], corners[2], fourth));
    }
    Ok(faces)
}

fn bare_corner(token: &str) -> std::result::Result<VertexIndex, String> {
    all_consuming(index)(token)
        .map(|(_, vertex)| VertexIndex::vertex_only(to_zero_based(Some(vertex))))
        .map_err(|_: nom::Err<nom::error::Error<&str>>| format!("invalid vertex index `{token}`"))
}

type CornerParts = (Option<i32>, Option<Option<i32>>, Option<Option<i32>>);

/// `v`, `v/t`, `v//n` or `v/t/n`, any part may be empty
fn corner_parts(input: &str) -> IResult<&str, CornerParts> {
    tuple((
        opt(index),
        opt(preceded(char('/'), opt(index))),
        opt(preceded(char('/'), opt(index))),
    ))(input)
}

fn corner(token: &str) -> std::result::Result<VertexIndex, String> {
    let (_, (vertex, texture, normal)) =
        all_consuming(corner_parts)(token).map_err(|_| format!("invalid face corner `{token}`"))?;

    Ok(VertexIndex::new(
        to_zero_based(vertex),
        to_zero_based(texture.flatten()),
        to_zero_based(normal.flatten()),
    ))
}

/// OBJ counts from 1; absent parts stay at the sentinel
fn to_zero_based(index: Option<i32>) -> i32 {
    match index {
        Some(index) => index.saturating_sub(1),
        None => NO_INDEX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_vertex_and_face() {
        let mesh = parse_obj("v 1.0 2.0 3.0\nf 1 1 1\n").unwrap();
        assert_eq!(mesh.vertices(), &[Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(mesh.faces(), &[Face::simple(0, 0, 0)]);
    }

    #[test]
    fn test_attributes() {
        let mesh = parse_obj(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 1\nvn 0 0 -1\nf 1/1/1 2/1/1 3/1/1\n",
        )
        .unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.texture_uvs(), &[Vec2::new(0.5, 1.0)]);
        assert_eq!(mesh.normals(), &[Vec3::new(0.0, 0.0, -1.0)]);
        assert_eq!(mesh.faces()[0].corners[1], VertexIndex::new(1, 0, 0));
    }

    #[test]
    fn test_mixed_face_switches_to_full_indices() {
        let mesh = parse_obj("f 1/2/3 4 5").unwrap();
        let corners = mesh.faces()[0].corners;
        assert_eq!(corners[0], VertexIndex::new(0, 1, 2));
        assert_eq!(corners[1], VertexIndex::new(3, NO_INDEX, NO_INDEX));
        assert_eq!(corners[2], VertexIndex::new(4, NO_INDEX, NO_INDEX));
    }

    #[test]
    fn test_missing_components_stay_sentinel() {
        let mesh = parse_obj("f 1//3 2/5 /7/").unwrap();
        let corners = mesh.faces()[0].corners;
        assert_eq!(corners[0], VertexIndex::new(0, NO_INDEX, 2));
        assert_eq!(corners[1], VertexIndex::new(1, 4, NO_INDEX));
        assert_eq!(corners[2], VertexIndex::new(NO_INDEX, 6, NO_INDEX));
    }

    #[test]
    fn test_quad_is_split() {
        let mesh = parse_obj("f 1 2 3 4").unwrap();
        assert_eq!(
            mesh.faces(),
            &[Face::simple(0, 1, 2), Face::simple(0, 2, 3)]
        );
    }

    #[test]
    fn test_comments_blank_lines_and_unknown_directives() {
        let input = "# a comment\n\n   \nmtllib cube.mtl\no cube\nv 1 2 3 # trailing\ns off\nusemtl red\nvn 0 1 0\n";
        let mesh = parse_obj(input).unwrap();
        assert_eq!(mesh.vertices(), &[Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(mesh.normals().len(), 1);
        assert!(mesh.faces().is_empty());
    }

    #[test]
    fn test_crlf_and_tabs() {
        let mesh = parse_obj("v\t1 2  3\r\nvt 0 1\r\n").unwrap();
        assert_eq!(mesh.vertices(), &[Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(mesh.texture_uvs().len(), 1);
    }

    #[test]
    fn test_wrong_vertex_arity_fails_whole_file() {
        let err = parse_obj("v 1.0 2.0\n").unwrap_err();
        match err {
            Error::Parse { line, content, .. } => {
                assert_eq!(line, 1);
                assert_eq!(content, "v 1.0 2.0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_reports_offending_line() {
        let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 x\nf 1 2 3\n";
        match parse_obj(input) {
            Err(Error::Parse { line, content, reason }) => {
                assert_eq!(line, 4);
                assert_eq!(content, "f 1 2 x");
                assert!(reason.contains("`x`"));
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejected_lines() {
        for input in [
            "vt 1 2 3",
            "vn 0 1",
            "v 1 2 abc",
            "v 1 2 3.0.0",
            "f 1 2",
            "f 1 2 3 4 5",
            "f 1/2/3/4 2 3",
            "f 1/a 2 3",
            "f 1.5 2 3",
        ] {
            assert!(
                matches!(parse_obj(input), Err(Error::Parse { line: 1, .. })),
                "`{input}` should be rejected"
            );
        }
    }

    #[test]
    fn test_unreadable_line_reports_its_number() {
        let input: &[u8] = b"v 0 0 0\nv \xff\xfe 1\nv 0 1 0\n";
        match read_obj(input) {
            Err(Error::Read { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
            }
            other => panic!("expected a read error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_obj("does/not/exist.obj").unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("sr3d-obj-{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let mesh = load_obj(&path);
        std::fs::remove_file(&path).unwrap();

        let mesh = mesh.unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces(), &[Face::simple(0, 1, 2)]);
    }

    #[test]
    fn test_load_malformed_file_from_disk() {
        let path = std::env::temp_dir().join(format!("sr3d-bad-{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 1 0\n").unwrap();
        let result = load_obj(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
    }
}
