use clap::{Parser, Subcommand};
use crop_common::{Orientation, SizeMode};
use regex::Regex;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "power-cropper")]
#[command(about = "画像フォルダの一括切り抜き・切り抜き履歴管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダを開いて対話的に切り抜く
    Session {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 向きの優先 (portrait/landscape)。省略時は設定値
        #[arg(short, long)]
        prefer: Option<Orientation>,
    },

    /// 画像に収まるプリセットと既定サイズを表示
    Presets {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 向きの優先 (portrait/landscape)。省略時は設定値
        #[arg(short, long)]
        prefer: Option<Orientation>,
    },

    /// 1枚の画像を切り抜いて保存
    Crop {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 切り抜く画像（フォルダ内のファイル名またはパス）
        #[arg(required = true)]
        image: PathBuf,

        /// 固定サイズ矩形の中心 X,Y
        #[arg(long, value_parser = parse_point, conflicts_with = "rect", required_unless_present = "rect")]
        at: Option<Point>,

        /// 固定サイズ (例: 1024x768)。省略時は既定サイズ
        #[arg(short, long, conflicts_with = "rect")]
        size: Option<SizeMode>,

        /// 任意矩形 L,T,R,B
        #[arg(long, value_parser = parse_corners)]
        rect: Option<Corners>,
    },

    /// フォルダの切り抜き状況を表示
    Status {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// 既定の向きの優先を設定
        #[arg(long)]
        orientation: Option<Orientation>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 画像上の点
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// 対角の2点 (x0, y0) - (x1, y1)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corners {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

lazy_static::lazy_static! {
    static ref POINT_RE: Regex = Regex::new(r"^\s*(-?\d+)\s*,\s*(-?\d+)\s*$").unwrap();
    static ref CORNERS_RE: Regex =
        Regex::new(r"^\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*$").unwrap();
}

/// `X,Y` を解析
pub fn parse_point(s: &str) -> Result<Point, String> {
    let caps = POINT_RE
        .captures(s)
        .ok_or_else(|| format!("Invalid point: {}. Use X,Y (e.g. 400,300)", s))?;
    Ok(Point {
        x: parse_number(&caps[1])?,
        y: parse_number(&caps[2])?,
    })
}

/// `L,T,R,B` を解析
pub fn parse_corners(s: &str) -> Result<Corners, String> {
    let caps = CORNERS_RE
        .captures(s)
        .ok_or_else(|| format!("Invalid rectangle: {}. Use L,T,R,B (e.g. 0,0,640,480)", s))?;
    Ok(Corners {
        x0: parse_number(&caps[1])?,
        y0: parse_number(&caps[2])?,
        x1: parse_number(&caps[3])?,
        y1: parse_number(&caps[4])?,
    })
}

fn parse_number(s: &str) -> Result<i64, String> {
    s.parse()
        .map_err(|_| format!("Number out of range: {}", s))
}
