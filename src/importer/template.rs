use csv::{QuoteStyle, WriterBuilder};

use crate::errors::{AppError, AppResult};
use crate::importer::sheet::EXPECTED_HEADERS;

pub const TEMPLATE_FILENAME: &str = "question_template.csv";

const SAMPLE_ROWS: [[&str; 10]; 2] = [
    [
        "当孩子发脾气时，家长最合适的第一反应是什么？",
        "立即批评孩子",
        "先倾听并接纳孩子的情绪",
        "不理睬孩子",
        "用零食转移注意力",
        "B",
        "先接纳情绪，孩子才能平静下来，之后再讨论行为。",
        "情绪管理",
        "简单",
        "正面管教",
    ],
    [
        "孩子做作业拖拉时，哪种做法更有助于培养自主性？",
        "全程陪坐监督",
        "和孩子一起制定计划并让其自己执行",
        "没写完就取消娱乐活动",
        "",
        "1",
        "共同制定计划能让孩子获得掌控感，逐步形成自我管理能力。",
        "学习习惯",
        "中等",
        "",
    ],
];

/// The downloadable import template: the fixed header plus two sample rows,
/// every field quoted.
pub fn csv_template() -> AppResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer
        .write_record(EXPECTED_HEADERS)
        .map_err(|e| AppError::InternalError(format!("Failed to write CSV template: {}", e)))?;
    for row in SAMPLE_ROWS {
        writer
            .write_record(row)
            .map_err(|e| AppError::InternalError(format!("Failed to write CSV template: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::InternalError(format!("Failed to flush CSV template: {}", e)))
}
