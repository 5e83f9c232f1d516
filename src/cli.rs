use clap::{Parser, Subcommand};
use road_damage_common::DamageStatus;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "road-damage")]
#[command(about = "道路損傷点検ダッシュボード（対応状況管理・集計）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 損傷データJSONファイル
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// 対応状況・画面設定の保存先JSONファイル
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 統計サマリー・種別分布・月別推移・緊急対応・最近の報告を表示
    Dashboard,

    /// 損傷一覧を絞り込み表示（条件は保存され次回に復元）
    List {
        /// 年月 (YYYY-MM / 全て)
        #[arg(short, long)]
        month: Option<String>,

        /// 損傷度 (大/中/小, 高度/中度/低度 / 全て)
        #[arg(short, long)]
        severity: Option<String>,

        /// 損傷種別 (全て)
        #[arg(short = 't', long = "type")]
        damage_type: Option<String>,

        /// 絞り込みを解除
        #[arg(long)]
        reset: bool,

        /// 絞り込みの選択肢を表示
        #[arg(long)]
        options: bool,
    },

    /// 対応状況を保存
    Status {
        /// 損傷ID
        #[arg(required = true)]
        id: u64,

        /// 対応状況 (pending/in-progress/completed/cancelled)
        #[arg(short, long)]
        status: DamageStatus,

        /// 対応完了日 YYYY-MM-DD（completedのみ、省略時は既存値または本日）
        #[arg(short = 'd', long)]
        response_date: Option<String>,

        /// 対応内容（省略時は既存値を維持）
        #[arg(long)]
        details: Option<String>,
    },

    /// 対話的に対応状況を編集
    Edit {
        /// 損傷ID（省略時は一覧から選択）
        id: Option<u64>,
    },

    /// 損傷を一覧から除外（削除フラグ）
    Delete {
        #[arg(required = true)]
        id: u64,
    },

    /// 削除フラグを解除
    Restore {
        #[arg(required = true)]
        id: u64,
    },

    /// 損傷を選択（詳細表示の対象にする）
    Select {
        #[arg(required = true)]
        id: u64,
    },

    /// 選択中の損傷の詳細を表示
    Show,

    /// 保存されている上書きを表示/削除
    Overrides {
        /// 上書きを削除（--id 指定時はそのIDのみ）
        #[arg(long)]
        clear: bool,

        /// 対象の損傷ID
        #[arg(long)]
        id: Option<u64>,
    },

    /// 損傷台帳をExcelに出力
    Export {
        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ドキュメントタイトル
        #[arg(short, long, default_value = "損傷台帳")]
        title: String,

        /// 保存中の絞り込み条件を適用
        #[arg(long)]
        filtered: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 損傷データファイルを設定
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// 保存先ファイルを設定
        #[arg(long)]
        set_storage: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
