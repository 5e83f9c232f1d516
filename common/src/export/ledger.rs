//! 損傷台帳のExcel生成（共通ライブラリ）
//!
//! マージ済みレコードを1シートの一覧表にしてバッファへ書き出す。

use crate::types::DamageRecord;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

const SHEET_NAME: &str = "損傷台帳";

/// 列見出しと列幅
const COLUMNS: &[(&str, f64)] = &[
    ("ID", 6.0),
    ("種別", 14.0),
    ("損傷度", 8.0),
    ("対応状況", 10.0),
    ("点検日時", 18.0),
    ("点検区間", 16.0),
    ("パトロール班", 12.0),
    ("対応完了日", 12.0),
    ("対応内容", 32.0),
    ("緯度", 11.0),
    ("経度", 11.0),
];

fn text_cells(record: &DamageRecord) -> [String; 9] {
    [
        record.id.to_string(),
        record.damage_type.clone(),
        record.severity.clone(),
        record.status.label().to_string(),
        record.inspection_time.clone(),
        record.inspection_section.clone().unwrap_or_default(),
        record.patrol_team.clone().unwrap_or_default(),
        record.response_date.clone().unwrap_or_default(),
        record.response_details.clone().unwrap_or_default(),
    ]
}

/// Excelをバッファに生成
///
/// 1行目にタイトル、2行目に見出し、3行目以降に1レコード1行。
pub fn generate_ledger_buffer(records: &[DamageRecord], title: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(14.0);

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let cell_format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    worksheet
        .write_string_with_format(0, 0, title, &title_format)
        .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;

    for (col, (label, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(1, col, *label, &header_format)
            .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 2;

        for (col, value) in text_cells(record).iter().enumerate() {
            worksheet
                .write_string_with_format(row, col as u16, value, &cell_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        // 座標は数値セル、未設定は空欄
        let coords = [(9u16, record.lat), (10u16, record.lng)];
        for (col, value) in coords {
            match value {
                Some(v) => worksheet.write_number_with_format(row, col, v, &cell_format),
                None => worksheet.write_blank(row, col, &cell_format),
            }
            .map_err(|e| format!("座標書き込みエラー: {}", e))?;
        }
    }

    worksheet
        .set_freeze_panes(2, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
