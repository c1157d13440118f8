use crate::config::RenderOptions;
use crate::tree::{NodeId, NodeKind, PrTree, ROOT};
use crossterm::style::Stylize;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// PR 行のタイトル欄はこの幅からプレフィックス幅を引いた分
const LINE_WIDTH: usize = 98;
/// ルート行の最小幅
const ROOT_MIN_WIDTH: usize = 8;

const BRANCH_CONT: &str = "├── ";
const BRANCH_END: &str = "└── ";
const FILL_VERTICAL: &str = "│   ";
const FILL_EMPTY: &str = "    ";

/// ツリーを深さ優先・行きがけ順で出力する
pub fn render_tree<W: Write>(out: &mut W, tree: &PrTree, options: RenderOptions) -> io::Result<()> {
    render_node(out, tree.node(ROOT).kind(), "", "", options)?;
    render_children(out, tree, ROOT, "", options)
}

fn render_children<W: Write>(
    out: &mut W,
    tree: &PrTree,
    parent: NodeId,
    indent: &str,
    options: RenderOptions,
) -> io::Result<()> {
    let children = tree.children(parent);
    for (i, &child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let (branch, fill) = if is_last {
            (BRANCH_END, FILL_EMPTY)
        } else {
            (BRANCH_CONT, FILL_VERTICAL)
        };
        let pre = format!("{indent}{branch}");
        let fill = format!("{indent}{fill}");

        render_node(out, tree.node(child).kind(), &pre, &fill, options)?;
        render_children(out, tree, child, &fill, options)?;
    }
    Ok(())
}

fn render_node<W: Write>(
    out: &mut W,
    kind: &NodeKind,
    pre: &str,
    fill: &str,
    options: RenderOptions,
) -> io::Result<()> {
    match kind {
        NodeKind::Root { title } => {
            let line = format!("{pre}{title}");
            writeln!(out, "{:<width$}", line, width = ROOT_MIN_WIDTH)
        }
        NodeKind::Branch { label } => writeln!(out, "{pre}{}", label.as_str().cyan()),
        NodeKind::Pull(pull) => {
            let number = if pull.is_merged {
                pull.number.to_string().red()
            } else {
                pull.number.to_string().green()
            };
            let title_width = LINE_WIDTH.saturating_sub(UnicodeWidthStr::width(pre));
            let title = fit_width(&pull.title, title_width);
            writeln!(
                out,
                "{pre}{number} {} [{} -> {}]",
                title.blue(),
                pull.head_label.as_str().yellow(),
                pull.base_label.as_str().cyan(),
            )?;
            if options.print_urls {
                writeln!(out, "{fill}{}", pull.url)?;
            }
            Ok(())
        }
    }
}

/// 表示幅をちょうど `width` に揃える（長ければ末尾を "…" で省略、短ければ空白で埋める）
fn fit_width(s: &str, width: usize) -> String {
    let mut result = if UnicodeWidthStr::width(s) <= width {
        s.to_string()
    } else if width == 0 {
        String::new()
    } else {
        let target = width - 1; // "…" の分
        let mut used = 0;
        let mut truncated = String::new();
        for ch in s.chars() {
            let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
            if used + cw > target {
                break;
            }
            used += cw;
            truncated.push(ch);
        }
        truncated.push('…');
        truncated
    };

    let padding = width.saturating_sub(UnicodeWidthStr::width(result.as_str()));
    result.extend(std::iter::repeat_n(' ', padding));
    result
}
