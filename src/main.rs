use clap::Parser;
use road_damage_common::{
    clear_selected, clear_selected_if, filter::FilterOptions, load_selected, save_selected, stats,
    DamageStore, DashboardSummary, FilterPreferences,
};
use road_damage_dashboard::{cli, config, dataset, editor, error, export, file_store, logging, render};
use cli::{Cli, Commands};
use config::Config;
use error::{DashboardError, Result};
use file_store::FileStore;
use std::path::{Path, PathBuf};

fn open_store(
    dataset: Option<&Path>,
    storage: Option<&Path>,
    config: &Config,
) -> Result<DamageStore<FileStore>> {
    let dataset_path = config.resolve_dataset(dataset)?;
    let storage_path = config.resolve_storage(storage)?;
    tracing::debug!(
        dataset = %dataset_path.display(),
        storage = %storage_path.display(),
        "ストアを開く"
    );

    let records = dataset::load_dataset(&dataset_path)?;
    Ok(DamageStore::new(records, FileStore::new(storage_path))?)
}

fn run_config(
    config: &Config,
    set_dataset: Option<PathBuf>,
    set_storage: Option<PathBuf>,
    show: bool,
) -> Result<()> {
    let mut config = config.clone();
    let mut changed = false;

    if let Some(path) = set_dataset {
        println!("✔ 損傷データファイルを設定しました: {}", path.display());
        config.dataset_path = Some(path);
        changed = true;
    }
    if let Some(path) = set_storage {
        println!("✔ 保存先を設定しました: {}", path.display());
        config.storage_path = Some(path);
        changed = true;
    }
    if changed {
        config.save()?;
    }

    if show || !changed {
        println!("設定:");
        println!("  設定ファイル: {}", Config::config_path()?.display());
        println!(
            "  損傷データ: {}",
            config
                .dataset_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "未設定".to_string())
        );
        println!("  保存先: {}", config.resolve_storage(None)?.display());
        println!("  損傷種別: {}", config.damage_types.join(", "));
        println!("  最近の報告件数: {}", config.recent_limit);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    let open = || open_store(cli.dataset.as_deref(), cli.storage.as_deref(), &config);

    match cli.command {
        Commands::Dashboard => {
            let store = open()?;
            println!("🛣  road-damage - 道路管理ダッシュボード\n");
            let records = store.merged_records();

            println!("[統計サマリー]");
            print!("{}", render::summary(&DashboardSummary::from_records(&records)));

            println!("\n[損傷種別分布]");
            print!(
                "{}",
                render::type_distribution(&stats::type_distribution(&records, &config.damage_types))
            );

            println!("\n[対応状況]");
            print!("{}", render::status_breakdown(&stats::status_breakdown(&records)));

            println!("\n[月別 損傷発生推移]");
            print!("{}", render::monthly_trend(&stats::monthly_trend(&records)));

            println!("\n[緊急対応が必要な損傷]");
            let urgent = stats::urgent(&records);
            if urgent.is_empty() {
                println!("  現在、緊急対応が必要な損傷はありません");
            } else {
                print!("{}", render::record_list(&urgent));
            }

            println!("\n[最近の損傷報告]");
            print!("{}", render::record_list(&stats::recent(&records, config.recent_limit)));
        }

        Commands::List { month, severity, damage_type, reset, options } => {
            let mut store = open()?;
            let records = store.merged_records();

            if options {
                println!("絞り込みの選択肢:");
                print!("{}", render::filter_options(&FilterOptions::from_records(&records)));
                return Ok(());
            }

            let mut prefs = if reset {
                FilterPreferences::reset(store.storage_mut())?
            } else {
                FilterPreferences::load(store.storage())
            };

            let mut changed = false;
            for (value, slot) in [
                (month, &mut prefs.month),
                (severity, &mut prefs.severity),
                (damage_type, &mut prefs.damage_type),
            ] {
                if let Some(value) = value {
                    *slot = value;
                    changed = true;
                }
            }
            if changed {
                prefs.save(store.storage_mut())?;
            }

            let matched = prefs.to_filter().apply(&records);
            println!(
                "絞り込み: {}  ({}件 / 全{}件)\n",
                render::filter_conditions(&prefs),
                matched.len(),
                records.len()
            );
            if matched.is_empty() {
                println!("  条件に一致する損傷はありません");
            } else {
                print!("{}", render::record_list(&matched));
            }
        }

        Commands::Status { id, status, response_date, details } => {
            let mut store = open()?;
            let current = store
                .find_with_override(id)
                .ok_or(DashboardError::RecordNotFound(id))?;
            let patch = editor::build_status_patch(
                &current,
                status,
                response_date.as_deref(),
                details.as_deref(),
            )?;
            let stored = store.save_override(id, patch)?;

            println!("✔ 保存しました: #{} → {}", id, status.label());
            if let Some(date) = stored.response_date.as_deref().filter(|d| !d.is_empty()) {
                println!("  対応完了日: {}", date);
            }
        }

        Commands::Edit { id } => {
            let mut store = open()?;
            println!("✏️  road-damage - 対応状況の編集\n");
            editor::run_interactive_edit(&mut store, id)?;
        }

        Commands::Delete { id } => {
            let mut store = open()?;
            if !store.contains(id) {
                return Err(DashboardError::RecordNotFound(id));
            }
            store.mark_deleted(id)?;
            clear_selected_if(store.storage_mut(), id)?;
            println!("✔ #{} を一覧から除外しました（`road-damage restore {}` で元に戻せます）", id, id);
        }

        Commands::Restore { id } => {
            let mut store = open()?;
            if !store.contains(id) {
                return Err(DashboardError::RecordNotFound(id));
            }
            store.restore(id)?;
            println!("✔ #{} を一覧に戻しました", id);
        }

        Commands::Select { id } => {
            let mut store = open()?;
            let record = store.find_merged(id).ok_or(DashboardError::RecordNotFound(id))?;
            save_selected(store.storage_mut(), &record)?;
            println!("✔ #{} を選択しました", id);
        }

        Commands::Show => {
            let store = open()?;
            match load_selected(store.storage()) {
                Some(record) => {
                    println!("選択中の損傷:");
                    print!("{}", render::record_detail(&record));
                }
                None => println!("選択中の損傷はありません。`road-damage select <ID>` で選択してください"),
            }
        }

        Commands::Overrides { clear, id } => {
            let mut store = open()?;
            if clear {
                match id {
                    Some(id) => {
                        if store.clear_override(id)? {
                            clear_selected_if(store.storage_mut(), id)?;
                            println!("✔ #{} の上書きを削除しました", id);
                        } else {
                            println!("#{} の上書きはありません", id);
                        }
                    }
                    None => {
                        store.clear_all_overrides()?;
                        clear_selected(store.storage_mut())?;
                        println!("✔ すべての上書きを削除しました（選択も解除）");
                    }
                }
            } else {
                let mut overrides = store.overrides();
                if let Some(id) = id {
                    overrides.retain(|key, _| *key == id.to_string());
                }
                println!(
                    "保存されている上書き ({}件) - {}:",
                    overrides.len(),
                    store.storage().path().display()
                );
                print!("{}", render::overrides(&overrides, &store.stray_override_ids()));
            }
        }

        Commands::Export { output, title, filtered } => {
            let store = open()?;
            println!("📄 road-damage - 損傷台帳出力\n");

            let mut records = store.merged_records();
            if filtered {
                let prefs = FilterPreferences::load(store.storage());
                records = prefs.to_filter().apply(&records);
                println!("- 絞り込み: {}", render::filter_conditions(&prefs));
            }

            let output = output.unwrap_or_else(|| PathBuf::from("."));
            let path = export::export_ledger(&records, &output, &title)?;
            println!("✔ {}件を出力: {}", records.len(), path.display());
            println!("\n✅ エクスポート完了");
        }

        // 設定コマンドは損傷データを必要としない
        Commands::Config { set_dataset, set_storage, show } => {
            run_config(&config, set_dataset, set_storage, show)?;
        }
    }

    Ok(())
}
