use anyhow::{bail, Context, Result};
use clap::Parser;
use power_cropper::{cli, config, interactive, logging, scanner, session};
use cli::{Cli, Commands};
use config::Config;
use crop_common::{preset, SizeMode};
use session::{path_key, CommitOutcome, CropSession};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗")?;

    match cli.command {
        Commands::Session { folder, prefer } => {
            println!("✂ power-cropper - 切り抜きセッション\n");

            let mut session = CropSession::from_config(&config)?;
            if let Some(orientation) = prefer {
                session.set_orientation(orientation);
            }
            let count = session
                .open_folder(&folder)
                .with_context(|| format!("フォルダを開けません: {}", folder.display()))?;
            println!("✔ {}枚の画像を検出\n", count);

            interactive::run_interactive_session(&mut session)?;
        }

        Commands::Presets { image, prefer } => {
            let (width, height) = image::image_dimensions(&image)
                .with_context(|| format!("画像を読み込めません: {}", image.display()))?;
            let orientation = prefer.unwrap_or(config.orientation);
            let best = preset::best_preset(width, height, orientation);

            println!("{} ({} x {} px, 優先: {})", image.display(), width, height, orientation);
            let fitting: Vec<String> = preset::fitting_presets(width, height)
                .iter()
                .map(|size| size.to_string())
                .collect();
            println!("  収まるプリセット: {}", if fitting.is_empty() { "なし".to_string() } else { fitting.join(", ") });
            println!("  既定サイズ: {}", best);
            for state in preset::preset_states(width, height, best) {
                let mark = if state.selected { "*" } else { " " };
                let status = if state.enabled { "選択可" } else { "選択不可" };
                println!("  {} {:<10} {}", mark, state.mode.to_string(), status);
            }
        }

        Commands::Crop { folder, image, at, size, rect } => {
            let mut session = CropSession::from_config(&config)?;
            let images = scanner::scan_folder(&folder)?;
            let target = resolve_image(&folder, &image)?;
            let Some(index) = images.iter().position(|p| *p == target) else {
                bail!("フォルダ内に画像がありません: {}", image.display());
            };
            session.load_images(&folder, images)?;
            if session.open_image(index).is_none() {
                bail!("画像を読み込めません: {}", target.display());
            }

            let outcome = if let Some(corners) = rect {
                session.select_size(SizeMode::Custom);
                session.begin_custom_drag(corners.x0, corners.y0);
                match session.finalize_custom_drag(corners.x1, corners.y1) {
                    Some(rect) => session.commit_crop(rect),
                    None => CommitOutcome::Rejected,
                }
            } else {
                if let Some(mode) = size {
                    if !session.select_size(mode) {
                        bail!("{} はこの画像に収まりません", mode);
                    }
                }
                match at.and_then(|point| session.place_rectangle_at(point.x, point.y)) {
                    Some(rect) => session.commit_crop(rect),
                    None => CommitOutcome::Skipped,
                }
            };

            match outcome {
                CommitOutcome::Saved { output, rect, recorded } => {
                    println!("✔ 保存: {} ({})", output.display(), rect.size_label());
                    if !recorded {
                        println!("  同じ切り抜きは記録済みです");
                    }
                }
                CommitOutcome::Rejected => bail!("矩形が小さすぎます"),
                CommitOutcome::Skipped => bail!("矩形を配置できません（custom モードでは --rect を使用）"),
                CommitOutcome::Failed(reason) => bail!("保存に失敗: {}", reason),
            }
        }

        Commands::Status { folder } => {
            let session = CropSession::from_config(&config)?;
            let folder_key = path_key(&scanner::absolute_folder(&folder)?);
            let history = session.history();

            println!("{}", folder_key);
            println!("  切り抜き済み画像: {}枚", history.image_count(&folder_key));
            let counts = history.counts_by_size(&folder_key);
            if counts.is_empty() {
                println!("  切り抜きはまだありません");
            }
            for (size, count) in &counts {
                println!("  {}: {}", size, count);
            }
            match session.resume().last_for(&folder_key) {
                Some(entry) => println!("  最後の切り抜き: {} ({})", entry.image_path, entry.size),
                None => println!("  最後の切り抜き: なし"),
            }
        }

        Commands::Config { orientation, show } => {
            let mut config = config;

            if let Some(orientation) = orientation {
                config.set_orientation(orientation)?;
                println!("✔ 向きの優先を設定しました: {}", orientation);
            }

            if show {
                println!("設定:");
                println!("  向きの優先: {}", config.orientation);
                println!("  出力フォルダ名: {}", config.output_dir_name);
                println!("  履歴ファイル: {}", config.history_path()?.display());
                println!("  再開ファイル: {}", config.resume_path()?.display());
            }
        }
    }

    Ok(())
}

/// 画像引数をフォルダ内の絶対パスに解決
fn resolve_image(folder: &Path, image: &Path) -> Result<PathBuf> {
    let candidate = if image.is_absolute() || image.exists() {
        image.to_path_buf()
    } else {
        folder.join(image)
    };
    Ok(std::path::absolute(candidate)?.components().collect())
}
