use kurbo::Point;

use crate::{
    arc::arc_to_cubics,
    curves::CubicSeq,
    error::{MorphError, MorphResult},
    math::round_to,
    model::{PathData, SubPath},
};

// Coordinates are snapped to this many decimal places while tokenizing so
// both ends of a morph agree on the same numeric grid.
const PARSE_PRECISION: u8 = 6;

const QUAD_RATIO: f64 = 2.0 / 3.0;

/// Parse SVG path data into absolute-coordinate cubic-bezier sub-paths.
///
/// Malformed input is reported to the diagnostic sink and returned as
/// [`MorphError::Parse`]; no partially-usable result is ever produced.
#[tracing::instrument(skip(d), fields(len = d.len()))]
pub fn parse_path(d: &str) -> MorphResult<PathData> {
    match parse_inner(d) {
        Ok(path) => Ok(path),
        Err(err) => {
            tracing::error!(code = 3, error = %err, "cannot parse path");
            Err(err)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cmd {
    Move,
    Line,
    Horiz,
    Vert,
    Close,
    Cubic,
    Smooth,
    Quad,
    QuadSmooth,
    Arc,
}

impl Cmd {
    fn from_letter(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            'M' => Self::Move,
            'L' => Self::Line,
            'H' => Self::Horiz,
            'V' => Self::Vert,
            'Z' => Self::Close,
            'C' => Self::Cubic,
            'S' => Self::Smooth,
            'Q' => Self::Quad,
            'T' => Self::QuadSmooth,
            'A' => Self::Arc,
            _ => return None,
        })
    }

    fn arg_count(self) -> usize {
        match self {
            Self::Move | Self::Line | Self::QuadSmooth => 2,
            Self::Horiz | Self::Vert => 1,
            Self::Close => 0,
            Self::Cubic => 6,
            Self::Smooth | Self::Quad => 4,
            Self::Arc => 7,
        }
    }
}

#[derive(Debug)]
struct RawCommand {
    cmd: Cmd,
    relative: bool,
    args: Vec<f64>,
}

struct ParserState {
    cursor: Point,
    /// Control point remembered for `S`/`T` reflection.
    last_ctrl: Point,
    last_cmd: Option<Cmd>,
    subpaths: Vec<CubicSeq>,
    closed: Vec<bool>,
}

fn parse_inner(d: &str) -> MorphResult<PathData> {
    let commands = tokenize(d)?;

    let mut st = ParserState {
        cursor: Point::ORIGIN,
        last_ctrl: Point::ORIGIN,
        last_cmd: None,
        subpaths: Vec::new(),
        closed: Vec::new(),
    };

    for raw in &commands {
        let argc = raw.cmd.arg_count();
        if argc == 0 {
            if !raw.args.is_empty() {
                return Err(MorphError::parse("close command takes no arguments"));
            }
            lower(&mut st, Cmd::Close, &[])?;
            continue;
        }
        if raw.args.is_empty() || raw.args.len() % argc != 0 {
            return Err(MorphError::parse(format!(
                "command has {} arguments, expected a multiple of {argc}",
                raw.args.len()
            )));
        }
        for (chunk_idx, chunk) in raw.args.chunks(argc).enumerate() {
            // A move command's extra coordinate pairs are implicit line
            // commands, keeping the original absolute/relative case.
            let cmd = if raw.cmd == Cmd::Move && chunk_idx > 0 {
                Cmd::Line
            } else {
                raw.cmd
            };
            let mut args = chunk.to_vec();
            if raw.relative {
                to_absolute(cmd, st.cursor, &mut args);
            }
            lower(&mut st, cmd, &args)?;
        }
    }

    let subpaths = st
        .subpaths
        .into_iter()
        .zip(st.closed)
        .map(|(seq, closed)| SubPath::from_seq(seq, closed))
        .collect();

    Ok(PathData {
        source: d.trim().to_string(),
        subpaths,
    })
}

fn tokenize(d: &str) -> MorphResult<Vec<RawCommand>> {
    let bytes = d.as_bytes();
    let mut out: Vec<RawCommand> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
            continue;
        }
        if c.is_ascii_alphabetic() {
            let cmd = Cmd::from_letter(c)
                .ok_or_else(|| MorphError::parse(format!("unknown command '{c}'")))?;
            out.push(RawCommand {
                cmd,
                relative: c.is_ascii_lowercase(),
                args: Vec::new(),
            });
            i += 1;
            continue;
        }

        let start = i;
        if c == '+' || c == '-' {
            i += 1;
        }
        let mut seen_digit = false;
        let mut seen_dot = false;
        while i < bytes.len() {
            match bytes[i] {
                b'0'..=b'9' => {
                    seen_digit = true;
                    i += 1;
                }
                b'.' if !seen_dot => {
                    seen_dot = true;
                    i += 1;
                }
                _ => break,
            }
        }
        if seen_digit && i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            let exp_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > exp_start {
                i = j;
            }
        }
        if !seen_digit {
            return Err(MorphError::parse(format!(
                "unexpected character '{c}' in path data"
            )));
        }

        let token = &d[start..i];
        let value: f64 = token
            .parse()
            .map_err(|_| MorphError::parse(format!("malformed number '{token}'")))?;
        if !value.is_finite() {
            return Err(MorphError::parse(format!("number '{token}' out of range")));
        }
        let value = round_to(value, PARSE_PRECISION);

        let Some(current) = out.last_mut() else {
            return Err(MorphError::parse("number before any command letter"));
        };
        current.args.push(value);
    }

    Ok(out)
}

/// Offset relative coordinates by the cursor. `H`/`V` carry a single axis
/// and arcs offset only their endpoint; everything else is (x, y) pairs.
fn to_absolute(cmd: Cmd, cursor: Point, args: &mut [f64]) {
    match cmd {
        Cmd::Horiz => args[0] += cursor.x,
        Cmd::Vert => args[0] += cursor.y,
        Cmd::Arc => {
            args[5] += cursor.x;
            args[6] += cursor.y;
        }
        Cmd::Close => {}
        _ => {
            for pair in args.chunks_mut(2) {
                pair[0] += cursor.x;
                pair[1] += cursor.y;
            }
        }
    }
}

fn lower(st: &mut ParserState, cmd: Cmd, a: &[f64]) -> MorphResult<()> {
    let cursor = st.cursor;
    match cmd {
        Cmd::Move => {
            let p = Point::new(a[0], a[1]);
            st.subpaths.push(CubicSeq::new(p));
            st.closed.push(false);
            st.cursor = p;
        }
        Cmd::Line => add_line(st, cmd, Point::new(a[0], a[1]))?,
        Cmd::Horiz => add_line(st, cmd, Point::new(a[0], cursor.y))?,
        Cmd::Vert => add_line(st, cmd, Point::new(cursor.x, a[0]))?,
        Cmd::Close => {
            let start = st
                .subpaths
                .last()
                .ok_or_else(|| MorphError::parse("close command before any move command"))?
                .start();
            add_curve(st, cmd, cursor, cursor, start)?;
            if let Some(z) = st.closed.last_mut() {
                *z = true;
            }
        }
        Cmd::Cubic => {
            add_curve(
                st,
                cmd,
                Point::new(a[0], a[1]),
                Point::new(a[2], a[3]),
                Point::new(a[4], a[5]),
            )?;
            st.last_ctrl = Point::new(a[2], a[3]);
        }
        Cmd::Smooth => {
            let c1 = if matches!(st.last_cmd, Some(Cmd::Cubic | Cmd::Smooth)) {
                reflect(cursor, st.last_ctrl)
            } else {
                cursor
            };
            add_curve(st, cmd, c1, Point::new(a[0], a[1]), Point::new(a[2], a[3]))?;
            st.last_ctrl = Point::new(a[0], a[1]);
        }
        Cmd::Quad => {
            let q = Point::new(a[0], a[1]);
            let end = Point::new(a[2], a[3]);
            add_curve(st, cmd, elevate(cursor, q), elevate(end, q), end)?;
            st.last_ctrl = q;
        }
        Cmd::QuadSmooth => {
            let end = Point::new(a[0], a[1]);
            let (c1, c2) = if matches!(st.last_cmd, Some(Cmd::Quad | Cmd::QuadSmooth)) {
                let q = reflect(cursor, st.last_ctrl);
                (elevate(cursor, q), elevate(end, q))
            } else {
                (cursor, cursor)
            };
            add_curve(st, cmd, c1, c2, end)?;
            st.last_ctrl = c2;
        }
        Cmd::Arc => {
            let to = Point::new(a[5], a[6]);
            let tuples = arc_to_cubics(cursor, a[0], a[1], a[2], a[3] != 0.0, a[4] != 0.0, to);
            for t in tuples.chunks(6) {
                add_curve(
                    st,
                    cmd,
                    Point::new(t[0], t[1]),
                    Point::new(t[2], t[3]),
                    Point::new(t[4], t[5]),
                )?;
            }
        }
    }
    Ok(())
}

fn reflect(cursor: Point, ctrl: Point) -> Point {
    Point::new(2.0 * cursor.x - ctrl.x, 2.0 * cursor.y - ctrl.y)
}

/// Quadratic-to-cubic control elevation: 2/3 of the way from an anchor
/// toward the quadratic control point.
fn elevate(anchor: Point, q: Point) -> Point {
    Point::new(
        anchor.x + (q.x - anchor.x) * QUAD_RATIO,
        anchor.y + (q.y - anchor.y) * QUAD_RATIO,
    )
}

fn add_line(st: &mut ParserState, cmd: Cmd, to: Point) -> MorphResult<()> {
    // straight lines are cubics with both controls on the segment start
    let from = st.cursor;
    add_curve(st, cmd, from, from, to)
}

fn add_curve(st: &mut ParserState, cmd: Cmd, c1: Point, c2: Point, end: Point) -> MorphResult<()> {
    let seq = st
        .subpaths
        .last_mut()
        .ok_or_else(|| MorphError::parse("drawing command before any move command"))?;
    seq.push_curve(c1, c2, end);
    st.cursor = end;
    st.last_cmd = Some(cmd);
    Ok(())
}
