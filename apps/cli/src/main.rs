//! camspoof: 仮想カメラをレジストリ上で実機カメラ名に見せかける CLI。
//! 列挙／改名／復元／バックアップ一覧／プリセット表示を行う。

use clap::{Parser, Subcommand};
use cs_composition::domain::model::{CameraRecord, Classification};
use cs_composition::error::{Result, err};
use cs_composition::{CliRuntime, Elevation, OperationOutcome, SpoofUseCase, ensure_elevated};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "camspoof", about = "Rename virtual cameras to look like real hardware")]
struct Cli {
    /// 管理者でなければ昇格して新しいウィンドウで再起動する（結果はそのウィンドウに表示）
    #[arg(long, global = true, default_value_t = false)]
    elevate: bool,
    /// 終了前に Enter を待つ（昇格後の別ウィンドウ用）
    #[arg(long, global = true, hide = true, default_value_t = false)]
    pause_on_exit: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 接続中のカメラと判定結果を表示
    List {
        /// JSON形式で出力
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// レジストリ上のカメラ名を置換（事前にバックアップ）
    Rename {
        /// 現在の名前（例: "OBS Virtual Camera"）
        #[arg(long)]
        from: String,
        /// 新しい名前（未指定なら設定の既定値）
        #[arg(long)]
        to: Option<String>,
        /// 確認をスキップ
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
        /// JSON形式で出力
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// バックアップから元の名前を復元
    Restore {
        /// 改名前の名前
        name: String,
        /// JSON形式で出力
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// バックアップ済みの名前を表示
    Backups {
        /// JSON形式で出力
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// 置換先の候補（ブランド別）を表示
    Presets {
        /// JSON形式で出力
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// 名前を仮想/実機/不明に判定
    Classify { name: String },
}

impl Command {
    fn json(&self) -> bool {
        match self {
            Self::List { json }
            | Self::Rename { json, .. }
            | Self::Restore { json, .. }
            | Self::Backups { json }
            | Self::Presets { json } => *json,
            Self::Classify { .. } => false,
        }
    }
}

#[derive(Serialize)]
struct JsonCamera {
    name: String,
    device_id: String,
    status: &'static str,
    is_virtual: bool,
    classification: &'static str,
    manufacturer: String,
    registry_path: Option<String>,
    backend: &'static str,
}

impl From<&CameraRecord> for JsonCamera {
    fn from(c: &CameraRecord) -> Self {
        Self {
            name: c.name.clone(),
            device_id: c.device_id.clone(),
            status: c.status.as_str(),
            is_virtual: c.is_virtual,
            classification: c.classification.as_str(),
            manufacturer: c.manufacturer.clone(),
            registry_path: c.registry_path.clone(),
            backend: c.backend.as_str(),
        }
    }
}

#[derive(Serialize)]
struct JsonScan {
    backend: Option<&'static str>,
    warnings: Vec<String>,
    cameras: Vec<JsonCamera>,
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    ok: bool,
    message: &'a str,
    matched: usize,
    modified: usize,
    failed: usize,
}

impl<'a> From<&'a OperationOutcome> for JsonOutcome<'a> {
    fn from(o: &'a OperationOutcome) -> Self {
        Self {
            ok: o.ok,
            message: &o.message,
            matched: o.matched,
            modified: o.modified,
            failed: o.failed,
        }
    }
}

#[derive(Serialize)]
struct JsonPreset {
    brand: &'static str,
    names: &'static [&'static str],
}

const ARG_ELEVATE: &str = "--elevate";
const ARG_PAUSE_ON_EXIT: &str = "--pause-on-exit";

fn main() {
    let cli = Cli::parse();
    let pause_on_exit = cli.pause_on_exit;
    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("camspoof failed: {err:#}");
            1
        }
    };
    if pause_on_exit {
        wait_for_enter();
    }
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {

    // 全依存関係はComposition Rootで組み立て
    let runtime = CliRuntime::new();
    cs_composition::write_lifecycle_line("cli", &format!("start: {:?}", cli.command));
    if let Some(warning) = runtime.config_warning() {
        eprintln!("warning: {warning}");
    }

    if cli.elevate {
        let args = relaunch_args(std::env::args().skip(1));
        let step = ensure_elevated(runtime.privilege(), &args);
        match &step {
            Elevation::Relaunched => eprintln!(
                "Restarted as administrator in a new window; the result is shown there."
            ),
            Elevation::Failed(reason) => {
                eprintln!("Could not restart as administrator: {reason}")
            }
            Elevation::AlreadyElevated => {}
        }
        if let Some(code) = step.exit_code() {
            return Ok(i32::from(code));
        }
    }

    if !cli.command.json() {
        eprintln!("{}", admin_status_line(runtime.is_elevated()));
    }

    let service = runtime.service();
    match cli.command {
        Command::List { json } => {
            // 列挙はバックグラウンドスレッドで行い、結果だけ受け取る
            let scan = runtime
                .spawn_scan()
                .recv()
                .map_err(|_| err("camera scan ended without a result"))?;
            for warning in &scan.warnings {
                cs_composition::write_lifecycle_line("enumerate", warning);
            }
            if json {
                let body = JsonScan {
                    backend: scan.backend.map(|b| b.as_str()),
                    warnings: scan.warnings.clone(),
                    cameras: scan.cameras.iter().map(JsonCamera::from).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                for warning in &scan.warnings {
                    eprintln!("warning: {warning}");
                }
                if scan.cameras.is_empty() {
                    println!("No cameras found.");
                } else {
                    let backend = scan.backend.map(|b| b.as_str()).unwrap_or("-");
                    println!("Cameras ({}, via {}):", scan.cameras.len(), backend);
                    for camera in &scan.cameras {
                        println!("  {}", camera_line(camera));
                    }
                }
            }
            Ok(0)
        }

        Command::Rename {
            from,
            to,
            yes,
            json,
        } => {
            let to = to.unwrap_or_else(|| service.default_target_name().to_string());
            if !json {
                println!("Rename '{}' -> '{}'", from, to);
                if service.classify(&from) == Classification::Real {
                    println!("  note: '{}' looks like real hardware", from);
                }
            }
            if !yes && !confirm("Proceed?")? {
                if !json {
                    println!("Cancelled.");
                }
                return Ok(1);
            }
            let outcome = service.rename(&from, &to);
            print_outcome(&outcome, json)?;
            Ok(exit_code(&outcome))
        }

        Command::Restore { name, json } => {
            let outcome = service.restore(&name);
            print_outcome(&outcome, json)?;
            Ok(exit_code(&outcome))
        }

        Command::Backups { json } => {
            let names = service.backed_up_names();
            if json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else if names.is_empty() {
                println!("No backups.");
            } else {
                println!("Backups ({}):", names.len());
                for name in &names {
                    println!("  {}", name);
                }
                println!("Stored in {}", runtime.backup_path().display());
            }
            Ok(0)
        }

        Command::Presets { json } => {
            if json {
                let body: Vec<JsonPreset> = service
                    .presets()
                    .iter()
                    .map(|&(brand, names)| JsonPreset { brand, names })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                for (brand, names) in service.presets() {
                    println!("{}:", brand);
                    for name in names.iter() {
                        let marker = if *name == service.default_target_name() {
                            " (default)"
                        } else {
                            ""
                        };
                        println!("  {}{}", name, marker);
                    }
                }
            }
            Ok(0)
        }

        Command::Classify { name } => {
            let classification = service.classify(&name);
            let treated = if service
                .classifier()
                .is_virtual(&name, service.unknown_policy())
            {
                "virtual"
            } else {
                "real"
            };
            println!("{}: {} (treated as {})", name, classification, treated);
            Ok(0)
        }
    }
}

/// 昇格後の子プロセスに渡す引数。子は別ウィンドウで動くので、閉じる前に待たせる
fn relaunch_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = args.into_iter().filter(|a| a != ARG_ELEVATE).collect();
    if !out.iter().any(|a| a == ARG_PAUSE_ON_EXIT) {
        out.push(ARG_PAUSE_ON_EXIT.to_string());
    }
    out
}

fn wait_for_enter() {
    eprint!("Press Enter to close...");
    let _ = io::stderr().flush();
    let mut input = String::new();
    let _ = io::stdin().read_line(&mut input);
}

fn admin_status_line(elevated: bool) -> &'static str {
    if elevated {
        "Running as administrator"
    } else {
        "Not running as administrator (rename/restore need --elevate)"
    }
}

fn camera_line(camera: &CameraRecord) -> String {
    let kind = if camera.is_virtual { "virtual" } else { "real" };
    format!(
        "[{:<7}] {} (id {}, {})",
        kind,
        camera.name,
        camera.device_id,
        camera.status.as_str()
    )
}

fn print_outcome(outcome: &OperationOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&JsonOutcome::from(outcome))?);
    } else if outcome.ok {
        println!("{}", outcome.message);
    } else {
        eprintln!("{}", outcome.message);
    }
    Ok(())
}

fn exit_code(outcome: &OperationOutcome) -> i32 {
    if outcome.ok { 0 } else { 1 }
}

fn confirm(question: &str) -> Result<bool> {
    eprint!("{} [y/N] ", question);
    io::stderr().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
