//! 対話式切り抜きセッション
//!
//! 1行ずつコマンドを受け取り、`CropSession` の操作を呼び出す端末用フロントエンド。

use crate::cli::{parse_corners, parse_point, Corners, Point};
use crate::error::{PowerCropError, Result};
use crate::session::{CommitOutcome, CropSession, JumpOutcome};
use crop_common::{Orientation, SizeMode};
use dialoguer::{Confirm, Input};

const HELP: &str = "操作: [d]次 [a]前 [s]保存 [x]削除 [w]最後の切り抜きへ \
[p X,Y]配置 [c L,T,R,B]任意矩形 [size WxH|custom] [o portrait|landscape] [q]終了";

/// 対話アクション
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Next,
    Prev,
    Save,
    Delete,
    JumpToLast,
    /// 固定サイズ矩形を配置
    Place(Point),
    /// 任意矩形を確定して保存
    Custom(Corners),
    Size(SizeMode),
    Orient(Orientation),
    Help,
    Quit,
    /// 解釈できない入力（理由）
    Invalid(String),
}

/// 入力行をアクションに変換
pub fn parse_action(input: &str) -> SessionAction {
    let trimmed = input.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match (command, rest) {
        ("" | "d", "") => SessionAction::Next,
        ("a", "") => SessionAction::Prev,
        ("s", "") => SessionAction::Save,
        ("x", "") => SessionAction::Delete,
        ("w", "") => SessionAction::JumpToLast,
        ("q" | "Q", "") => SessionAction::Quit,
        ("h" | "?" | "help", _) => SessionAction::Help,
        ("p", arg) => parse_point(arg).map_or_else(SessionAction::Invalid, SessionAction::Place),
        ("c", arg) => parse_corners(arg).map_or_else(SessionAction::Invalid, SessionAction::Custom),
        ("size", arg) => arg
            .parse()
            .map_or_else(|e: crop_common::Error| SessionAction::Invalid(e.to_string()), SessionAction::Size),
        ("o", arg) => arg
            .parse()
            .map_or_else(|e: crop_common::Error| SessionAction::Invalid(e.to_string()), SessionAction::Orient),
        _ => SessionAction::Invalid(format!("不明なコマンド: {}", trimmed)),
    }
}

/// 対話式で切り抜く
pub fn run_interactive_session(session: &mut CropSession) -> Result<()> {
    println!("{}", HELP);
    println!("---\n");

    while !session.images().is_empty() {
        print_status(session);

        let input: String = Input::new()
            .with_prompt("操作")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PowerCropError::CliExecution(e.to_string()))?;

        match parse_action(&input) {
            SessionAction::Next => {
                session.advance(1);
            }
            SessionAction::Prev => {
                session.advance(-1);
            }
            SessionAction::Save => report_commit(session.quick_save()),
            SessionAction::Delete => {
                let confirmed = Confirm::new()
                    .with_prompt("この画像ファイルを削除しますか？")
                    .default(false)
                    .interact()
                    .map_err(|e| PowerCropError::CliExecution(e.to_string()))?;
                if confirmed {
                    if let Some(path) = session.delete_current_image() {
                        println!("  → 削除: {}\n", path.display());
                    }
                }
            }
            SessionAction::JumpToLast => report_jump(session.jump_to_last_cropped()),
            SessionAction::Place(point) => match session.place_rectangle_at(point.x, point.y) {
                Some(rect) => println!("  → 矩形 {:?} ({})\n", <[u32; 4]>::from(rect), rect.size_label()),
                None => println!("  → custom モードでは配置できません（c L,T,R,B を使用）\n"),
            },
            SessionAction::Custom(corners) => {
                if !session.size_mode().is_custom() {
                    session.select_size(SizeMode::Custom);
                }
                session.begin_custom_drag(corners.x0, corners.y0);
                session.update_custom_drag(corners.x1, corners.y1);
                if let Some(label) = session.drag_label() {
                    println!("  {}", label);
                }
                match session.finalize_custom_drag(corners.x1, corners.y1) {
                    Some(rect) => report_commit(session.commit_crop(rect)),
                    None => println!("  → 矩形が小さすぎます\n"),
                }
            }
            SessionAction::Size(mode) => {
                if session.select_size(mode) {
                    println!("  → サイズ: {}\n", mode);
                } else {
                    println!("  → {} はこの画像に収まりません\n", mode);
                }
            }
            SessionAction::Orient(orientation) => {
                session.set_orientation(orientation);
                println!("  → 向きの優先: {} (サイズ: {})\n", orientation, session.size_mode());
            }
            SessionAction::Help => println!("{}\n", HELP),
            SessionAction::Quit => {
                println!("終了します");
                return Ok(());
            }
            SessionAction::Invalid(reason) => println!("  → {}\n", reason),
        }
    }

    println!("画像がなくなりました。終了します");
    Ok(())
}

fn print_status(session: &CropSession) {
    if let Some(path) = session.current_path() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        println!("{}", name);
    }
    if session.is_unreadable() {
        if let Some((position, total)) = session.position() {
            println!("  画像を読み込めません ({}/{})  [d]/[a] で移動、[x] で削除", position, total);
        }
        return;
    }
    if let Some(label) = session.dimension_label() {
        println!("  {}", label);
    }
    if let Some(label) = session.cropped_label() {
        println!("  {}", label);
    }

    let presets: Vec<String> = session
        .preset_states()
        .iter()
        .map(|state| match (state.selected, state.enabled) {
            (true, _) => format!("[{}]", state.mode),
            (false, true) => state.mode.to_string(),
            (false, false) => format!("({})", state.mode),
        })
        .collect();
    println!("  サイズ: {}  優先: {}", presets.join(" "), session.orientation());

    match session.current_rect() {
        Some(rect) => println!("  矩形: {:?} ({})", <[u32; 4]>::from(rect), rect.size_label()),
        None => println!("  矩形: なし"),
    }

    let counts = session.counts_by_size();
    if !counts.is_empty() {
        let text: Vec<String> = counts
            .iter()
            .map(|(size, count)| format!("{}: {}", size, count))
            .collect();
        println!("  切り抜き済み: {}", text.join(", "));
    }
}

fn report_commit(outcome: CommitOutcome) {
    match outcome {
        CommitOutcome::Saved { output, recorded, .. } => {
            let note = if recorded { "" } else { " (記録済みの切り抜き)" };
            println!("  → 保存: {}{}\n", output.display(), note);
        }
        CommitOutcome::Rejected => println!("  → 矩形が小さすぎます\n"),
        CommitOutcome::Skipped => println!("  → 矩形がありません\n"),
        CommitOutcome::Failed(reason) => println!("  → 保存に失敗: {}\n", reason),
    }
}

fn report_jump(outcome: JumpOutcome) {
    match outcome {
        JumpOutcome::Jumped(index) => println!("  → {}枚目へ移動\n", index + 1),
        JumpOutcome::NoFolder | JumpOutcome::NoEntry => println!("  → このフォルダの切り抜き記録はありません\n"),
        JumpOutcome::Stale(path) => {
            println!("  → 最後に切り抜いた画像が見つかりません: {}\n", path.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_actions() {
        assert_eq!(parse_action("d"), SessionAction::Next);
        assert_eq!(parse_action(""), SessionAction::Next);
        assert_eq!(parse_action("a"), SessionAction::Prev);
        assert_eq!(parse_action(" s "), SessionAction::Save);
        assert_eq!(parse_action("x"), SessionAction::Delete);
        assert_eq!(parse_action("w"), SessionAction::JumpToLast);
        assert_eq!(parse_action("q"), SessionAction::Quit);
    }

    #[test]
    fn test_parse_actions_with_arguments() {
        assert_eq!(parse_action("p 400,300"), SessionAction::Place(Point { x: 400, y: 300 }));
        assert_eq!(
            parse_action("c 0,0,64,48"),
            SessionAction::Custom(Corners { x0: 0, y0: 0, x1: 64, y1: 48 })
        );
        assert_eq!(parse_action("size custom"), SessionAction::Size(SizeMode::Custom));
        assert_eq!(
            parse_action("size 768x512"),
            SessionAction::Size("768x512".parse().unwrap())
        );
        assert_eq!(parse_action("o landscape"), SessionAction::Orient(Orientation::Landscape));
    }

    #[test]
    fn test_parse_invalid_actions() {
        assert!(matches!(parse_action("p 400"), SessionAction::Invalid(_)));
        assert!(matches!(parse_action("size big"), SessionAction::Invalid(_)));
        assert!(matches!(parse_action("jump"), SessionAction::Invalid(_)));
        assert!(matches!(parse_action("d now"), SessionAction::Invalid(_)));
    }
}
