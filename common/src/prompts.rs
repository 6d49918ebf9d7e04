//! プロンプト生成モジュール
//!
//! 生成AI APIに送る家庭療法プロンプトを組み立てる

/// 家庭療法プロンプト生成
///
/// 最上位予測の病名を埋め込み、前置き・後書きなしの
/// 箇条書き5項目を要求する
///
/// # Arguments
/// * `condition` - 最上位予測のクラス名
///
/// # Returns
/// 生成AI APIへ送るプロンプト文字列
pub fn build_remedy_prompt(condition: &str) -> String {
    format!(
        "Provide 5 concise home remedies for \"{condition}\" in a bulleted list format. \
         Do not include any introductory or concluding sentences. \
         Only provide the bullet points. Each remedy should be short."
    )
}
