//! Interactive line-oriented editing shell.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use drawbench_core::{Color, Editor, ShapeKind};
use kurbo::{Point, Vec2};

const HELP: &str = "\
commands:
  square X Y        place a square centered at (X, Y)
  circle X Y        place a circle centered at (X, Y)
  rect X Y          place a rectangle centered at (X, Y)
  color NAME        set the drawing color (red, blue, green, yellow, black)
  select X Y        select shapes containing (X, Y); miss clears selection
  box X0 Y0 X1 Y1   select shapes intersecting the rectangle
  deselect          clear the selection
  move DX DY        move selected shapes
  resize up|down    grow or shrink selected shapes
  rotate DEG        rotate selected squares and rectangles
  delete            delete selected shapes
  clear             remove all shapes
  undo / redo       step through history
  list              list the shapes in the scene
  save [FILE]       save the scene (.txt or .json)
  load FILE         load a scene file
  help              show this help
  quit              exit";

pub fn run(file: Option<PathBuf>) -> Result<()> {
    let mut editor = Editor::new();
    let mut session_file = file;

    if let Some(path) = &session_file
        && path.exists()
    {
        editor.replace_scene(crate::load_any(path)?);
        println!("loaded {} ({} shapes)", path.display(), editor.scene().len());
    }
    println!("drawbench editor; type `help` for commands");

    let mut lines = io::stdin().lock().lines();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if !dispatch(&mut editor, &mut session_file, &tokens) {
            break;
        }
    }
    Ok(())
}

/// Run one shell command. Returns false when the shell should exit.
fn dispatch(editor: &mut Editor, session_file: &mut Option<PathBuf>, tokens: &[&str]) -> bool {
    match (tokens[0], &tokens[1..]) {
        ("square", [x, y]) => place(editor, ShapeKind::Square, x, y),
        ("circle", [x, y]) => place(editor, ShapeKind::Circle, x, y),
        ("rect" | "rectangle", [x, y]) => place(editor, ShapeKind::Rectangle, x, y),
        ("color", [name]) => match parse_color(name) {
            Some(color) => editor.set_color(color),
            None => println!("unknown color `{name}` (red, blue, green, yellow, black)"),
        },
        ("select", [x, y]) => {
            if let (Some(x), Some(y)) = (number(x), number(y)) {
                let n = editor.select_at(Point::new(x, y));
                println!("{n} selected");
            }
        }
        ("box", [x0, y0, x1, y1]) => {
            if let (Some(x0), Some(y0), Some(x1), Some(y1)) =
                (number(x0), number(y0), number(x1), number(y1))
            {
                let n = editor.box_select(Point::new(x0, y0), Point::new(x1, y1));
                println!("{n} selected");
            }
        }
        ("deselect", []) => editor.deselect_all(),
        ("move", [dx, dy]) => {
            if let (Some(dx), Some(dy)) = (number(dx), number(dy))
                && !editor.move_selected(Vec2::new(dx, dy))
            {
                println!("nothing selected");
            }
        }
        ("resize", ["up"]) => {
            if !editor.scale_selected(drawbench_core::editor::GROW_FACTOR) {
                println!("nothing selected");
            }
        }
        ("resize", ["down"]) => {
            if !editor.scale_selected(drawbench_core::editor::SHRINK_FACTOR) {
                println!("nothing selected");
            }
        }
        ("rotate", [deg]) => {
            if let Some(deg) = number(deg)
                && !editor.rotate_selected(deg)
            {
                println!("nothing rotatable selected");
            }
        }
        ("delete", []) => {
            let n = editor.delete_selected();
            println!("{n} deleted");
        }
        ("clear", []) => {
            if !editor.clear_scene() {
                println!("scene already empty");
            }
        }
        ("undo", []) => {
            if !editor.undo() {
                println!("nothing to undo");
            }
        }
        ("redo", []) => {
            if !editor.redo() {
                println!("nothing to redo");
            }
        }
        ("list", []) => {
            if editor.scene().is_empty() {
                println!("empty scene");
            } else {
                for shape in editor.scene().iter() {
                    println!("{}", crate::describe(shape));
                }
            }
        }
        ("save", rest) => {
            let path = match rest {
                [file] => Some(PathBuf::from(file)),
                [] => session_file.clone(),
                _ => {
                    println!("usage: save [FILE]");
                    None
                }
            };
            if let Some(path) = path {
                let path = drawbench_core::storage::with_default_extension(&path);
                match crate::save_any(editor.scene(), &path) {
                    Ok(()) => {
                        println!("saved {}", path.display());
                        *session_file = Some(path);
                    }
                    Err(e) => println!("error: {e:#}"),
                }
            } else if rest.is_empty() {
                println!("no file associated; use `save FILE`");
            }
        }
        ("load", [file]) => {
            let path = PathBuf::from(file);
            match crate::load_any(&path) {
                Ok(scene) => {
                    println!("loaded {} ({} shapes)", path.display(), scene.len());
                    editor.replace_scene(scene);
                    *session_file = Some(path);
                }
                Err(e) => println!("error: {e:#}"),
            }
        }
        ("help", []) => println!("{HELP}"),
        ("quit" | "exit", []) => return false,
        _ => println!("unrecognized command; type `help`"),
    }
    true
}

fn place(editor: &mut Editor, kind: ShapeKind, x: &str, y: &str) {
    if let (Some(x), Some(y)) = (number(x), number(y)) {
        editor.set_shape_kind(kind);
        editor.add_shape_at(Point::new(x, y));
        println!("added {kind} at ({x}, {y})");
    }
}

fn number(token: &str) -> Option<f64> {
    match token.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            println!("invalid number `{token}`");
            None
        }
    }
}

fn parse_color(name: &str) -> Option<Color> {
    match name.to_ascii_uppercase().as_str() {
        "RED" => Some(Color::Red),
        "BLUE" => Some(Color::Blue),
        "GREEN" => Some(Color::Green),
        "YELLOW" => Some(Color::Yellow),
        "BLACK" => Some(Color::Black),
        _ => None,
    }
}
