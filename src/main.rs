//! Headless console driver, mostly for poking the engine during
//! development: feed it pointer/key commands on stdin and it prints the
//! resulting scene and render calls.

use std::collections::HashMap;
use std::io::{self, BufRead};

use anyhow::{Context, Result, bail};

use sketchboard::{
    Appearance, Editor, IconChoice, IconInfo, Key, Point, Shape, StrokeRenderer, Tool,
    parse_descriptors, render_scene,
};

struct ConsoleRenderer;

impl StrokeRenderer for ConsoleRenderer {
    fn draw_shape(&mut self, shape: &Shape, appearance: &Appearance) {
        println!(
            "  shape {:?} stroke={} dash={:?} seed={}",
            shape, appearance.stroke, appearance.dash, appearance.seed
        );
    }

    fn draw_text(&mut self, text: &str, position: Point, size: f32, color: &str) {
        println!("  text {text:?} at {position:?} size={size} color={color}");
    }

    fn draw_icon(&mut self, key: &str, fill: &str, rect: (f32, f32, f32, f32)) {
        println!("  icon {key} fill={fill} rect={rect:?}");
    }

    fn draw_selection(&mut self, rect: (f32, f32, f32, f32)) {
        println!("  selection {rect:?}");
    }
}

fn demo_catalog() -> HashMap<String, IconInfo> {
    let mut catalog = HashMap::new();
    catalog.insert(
        "server".to_string(),
        IconInfo {
            name: "Server".to_string(),
            path: "M4 2h16v8H4zm0 12h16v8H4z".to_string(),
            view_box: (24.0, 24.0),
            fill: "#ed7100".to_string(),
        },
    );
    catalog.insert(
        "database".to_string(),
        IconInfo {
            name: "Database".to_string(),
            path: "M12 2C7 2 3 3.5 3 6v12c0 2.5 4 4 9 4s9-1.5 9-4V6c0-2.5-4-4-9-4z"
                .to_string(),
            view_box: (24.0, 24.0),
            fill: "#3b48cc".to_string(),
        },
    );
    catalog
}

fn parse_tool(name: &str) -> Result<Tool> {
    Ok(match name {
        "selection" => Tool::Selection,
        "hand" => Tool::Hand,
        "rectangle" => Tool::Rectangle,
        "diamond" => Tool::Diamond,
        "circle" => Tool::Circle,
        "arrow" => Tool::Arrow,
        "line" => Tool::Line,
        "draw" => Tool::Draw,
        "eraser" => Tool::Eraser,
        "text" => Tool::Text,
        "icon" => Tool::Icon,
        other => bail!("unknown tool {other:?}"),
    })
}

fn parse_point(args: &[&str]) -> Result<Point> {
    let x = args.first().context("missing x")?.parse()?;
    let y = args.get(1).context("missing y")?.parse()?;
    Ok([x, y])
}

fn run_command(
    editor: &mut Editor,
    catalog: &HashMap<String, IconInfo>,
    line: &str,
) -> Result<bool> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = parts.split_first() else {
        return Ok(false);
    };

    match command {
        "tool" => {
            editor.set_tool(parse_tool(args.first().context("missing tool name")?)?);
        }
        "pick-icon" => {
            let key = args.first().context("missing icon key")?;
            let info = catalog.get(*key).context("icon not in catalog")?;
            editor.icon_choice = Some(IconChoice {
                key: (*key).to_string(),
                label: info.name.clone(),
            });
        }
        "down" => {
            let pan = args.get(2) == Some(&"pan");
            editor.pointer_down(parse_point(args)?, pan);
        }
        "move" => editor.pointer_move(parse_point(args)?),
        "up" => editor.pointer_up(),
        "cancel" => editor.pointer_cancel(),
        "wheel" => {
            let p = parse_point(args)?;
            let zoom = args.get(2) == Some(&"zoom");
            editor.wheel(p[0], p[1], zoom, [0.0, 0.0]);
        }
        "key" => {
            let c = args
                .first()
                .and_then(|a| a.chars().next())
                .context("missing key")?;
            let ctrl = args.contains(&"ctrl");
            let shift = args.contains(&"shift");
            editor.handle_key(Key::Char(c), ctrl, shift);
        }
        "undo" => editor.undo(),
        "redo" => editor.redo(),
        "delete" => editor.delete_selection(),
        "text" => {
            let content = args.join(" ");
            editor.submit_text((!content.is_empty()).then_some(content));
        }
        "assist" => {
            // stands in for the model call: the reply JSON comes inline
            editor.begin_assist()?;
            editor.finish_assist(parse_descriptors(&args.join(" ")));
            if let Some(notice) = editor.take_notice() {
                println!("assistant: {notice}");
            }
        }
        "render" => {
            let mut renderer = ConsoleRenderer;
            render_scene(
                &mut renderer,
                editor.elements(),
                editor.in_progress(),
                editor.selected_id(),
                &editor.view,
                catalog,
            );
        }
        "list" => {
            for el in editor.elements() {
                println!(
                    "  {} {:?} ({}, {}) -> ({}, {})",
                    el.id, el.kind, el.x1, el.y1, el.x2, el.y2
                );
            }
            println!(
                "  scale={} offset={:?} selected={:?}",
                editor.view.scale,
                editor.view.offset,
                editor.selected_id()
            );
        }
        "quit" => return Ok(true),
        other => bail!("unknown command {other:?}"),
    }
    Ok(false)
}

fn main() -> Result<()> {
    env_logger::init();

    let catalog = demo_catalog();
    let mut editor = Editor::new();
    println!("sketchboard console (tool/down/move/up/wheel/undo/redo/render/list/quit)");

    for line in io::stdin().lock().lines() {
        let line = line?;
        match run_command(&mut editor, &catalog, &line) {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => println!("error: {err}"),
        }
    }
    Ok(())
}
