//! ページセッション状態機械
//!
//! 画像選択から予測・家庭療法取得までの状態遷移を1箇所で管理する。
//! 各パイプラインは世代カウンタを持ち、リセット後に届いた
//! 古いレスポンスは世代不一致で破棄される。

use crate::error::{Error, Result};
use crate::types::{Prediction, RequestStatus, SelectedImage};

/// 予測ページのセッション状態
///
/// 所有者はページコンポーネントのみ。ページ遷移で破棄され、永続化しない
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionSession {
    selected: Option<SelectedImage>,
    predict_status: RequestStatus,
    predictions: Vec<Prediction>,
    remedy_status: RequestStatus,
    remedies: Vec<String>,
    predict_generation: u64,
    remedy_generation: u64,
}

impl PredictionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn predict_status(&self) -> &RequestStatus {
        &self.predict_status
    }

    /// 確率降順の予測リスト（受信時にソート済み）
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// 最上位予測（家庭療法取得の対象）
    pub fn top_prediction(&self) -> Option<&Prediction> {
        self.predictions.first()
    }

    pub fn remedy_status(&self) -> &RequestStatus {
        &self.remedy_status
    }

    pub fn remedies(&self) -> &[String] {
        &self.remedies
    }

    /// 画像選択
    ///
    /// 以前のファイルは黙って置き換え、結果とエラーを破棄する
    pub fn select_image(&mut self, image: SelectedImage) {
        self.selected = Some(image);
        self.reset_results();
    }

    /// 明示的クリア: どの状態からでも未選択に戻す
    pub fn clear(&mut self) {
        self.selected = None;
        self.reset_results();
    }

    /// 送信開始
    ///
    /// 戻り値は今回の送信の世代。次の場合はネットワーク呼び出し不要としてNone:
    /// - 送信中（多重送信はここで禁止。UIのボタン無効化には頼らない）
    /// - 画像未選択（ローカルの検証エラーを記録する）
    pub fn begin_submit(&mut self) -> Option<u64> {
        if self.predict_status.is_loading() {
            return None;
        }
        if self.selected.is_none() {
            self.predict_status = RequestStatus::Failed(Error::NoImageSelected.to_string());
            return None;
        }

        self.predictions.clear();
        self.remedies.clear();
        self.remedy_status = RequestStatus::Idle;
        self.remedy_generation += 1;
        self.predict_status = RequestStatus::Loading;
        self.predict_generation += 1;
        Some(self.predict_generation)
    }

    /// 送信完了
    ///
    /// 世代が現在と一致しないレスポンスは破棄する
    pub fn resolve_submit(&mut self, generation: u64, outcome: Result<Vec<Prediction>>) {
        if generation != self.predict_generation || !self.predict_status.is_loading() {
            return;
        }
        match outcome {
            Ok(predictions) => {
                self.predictions = predictions;
                self.predict_status = RequestStatus::Succeeded;
            }
            Err(error) => {
                self.predict_status = RequestStatus::Failed(error.to_string());
            }
        }
    }

    /// 家庭療法取得開始
    ///
    /// 予測パイプラインが完了済み、かつ最上位予測がある場合のみ開始する
    pub fn begin_remedy(&mut self) -> Option<u64> {
        if self.predict_status.is_loading() || self.predict_status.error().is_some() {
            return None;
        }
        self.top_prediction()?;

        self.remedies.clear();
        self.remedy_status = RequestStatus::Loading;
        self.remedy_generation += 1;
        Some(self.remedy_generation)
    }

    /// 家庭療法取得完了
    ///
    /// 世代が古いレスポンスは破棄する。失敗しても予測結果には触れない
    pub fn resolve_remedy(&mut self, generation: u64, outcome: Result<Vec<String>>) {
        if generation != self.remedy_generation || !self.remedy_status.is_loading() {
            return;
        }
        match outcome {
            Ok(remedies) => {
                self.remedies = remedies;
                self.remedy_status = RequestStatus::Succeeded;
            }
            Err(error) => {
                self.remedy_status = RequestStatus::Failed(error.to_string());
            }
        }
    }

    fn reset_results(&mut self) {
        self.predictions.clear();
        self.remedies.clear();
        self.predict_status = RequestStatus::Idle;
        self.remedy_status = RequestStatus::Idle;
        // 飛行中のレスポンスを無効化
        self.predict_generation += 1;
        self.remedy_generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> SelectedImage {
        SelectedImage {
            name: "lesion.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            size: 2048,
            data_url: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
        }
    }

    fn sample_predictions() -> Vec<Prediction> {
        vec![
            Prediction {
                class_name: "Eczema".to_string(),
                probability: 0.9,
            },
            Prediction {
                class_name: "Acne".to_string(),
                probability: 0.1,
            },
        ]
    }

    #[test]
    fn test_submit_without_image_records_validation_error() {
        let mut session = PredictionSession::new();
        let generation = session.begin_submit();

        assert_eq!(generation, None);
        assert_eq!(
            session.predict_status().error(),
            Some("Please select an image to analyze.")
        );
    }

    #[test]
    fn test_submit_while_loading_is_noop() {
        let mut session = PredictionSession::new();
        session.select_image(sample_image());

        let first = session.begin_submit();
        assert!(first.is_some());

        let second = session.begin_submit();
        assert_eq!(second, None);
        assert!(session.predict_status().is_loading());
    }

    #[test]
    fn test_successful_submit_flow() {
        let mut session = PredictionSession::new();
        session.select_image(sample_image());

        let generation = session.begin_submit().unwrap();
        assert!(session.predict_status().is_loading());

        session.resolve_submit(generation, Ok(sample_predictions()));
        assert_eq!(*session.predict_status(), RequestStatus::Succeeded);
        assert_eq!(session.top_prediction().unwrap().class_name, "Eczema");
    }

    #[test]
    fn test_failed_submit_records_message() {
        let mut session = PredictionSession::new();
        session.select_image(sample_image());

        let generation = session.begin_submit().unwrap();
        session.resolve_submit(generation, Err(Error::Backend("bad image".to_string())));

        assert_eq!(session.predict_status().error(), Some("bad image"));
        assert!(session.predictions().is_empty());
    }

    #[test]
    fn test_stale_submit_response_is_discarded() {
        let mut session = PredictionSession::new();
        session.select_image(sample_image());
        let stale = session.begin_submit().unwrap();

        // 飛行中に新しい画像が選ばれた
        session.select_image(sample_image());
        session.resolve_submit(stale, Ok(sample_predictions()));

        assert!(session.predictions().is_empty());
        assert_eq!(*session.predict_status(), RequestStatus::Idle);
    }

    #[test]
    fn test_remedy_requires_completed_prediction() {
        let mut session = PredictionSession::new();
        assert_eq!(session.begin_remedy(), None);

        session.select_image(sample_image());
        let generation = session.begin_submit().unwrap();
        // 送信中は開始しない
        assert_eq!(session.begin_remedy(), None);

        session.resolve_submit(generation, Ok(sample_predictions()));
        assert!(session.begin_remedy().is_some());
    }

    #[test]
    fn test_remedy_not_started_after_failure() {
        let mut session = PredictionSession::new();
        session.select_image(sample_image());
        let generation = session.begin_submit().unwrap();
        session.resolve_submit(generation, Err(Error::Http(500)));

        assert_eq!(session.begin_remedy(), None);
    }

    #[test]
    fn test_remedy_failure_leaves_predictions_untouched() {
        let mut session = PredictionSession::new();
        session.select_image(sample_image());
        let generation = session.begin_submit().unwrap();
        session.resolve_submit(generation, Ok(sample_predictions()));

        let remedy_generation = session.begin_remedy().unwrap();
        session.resolve_remedy(remedy_generation, Err(Error::RemedyFetchFailed));

        assert_eq!(
            session.remedy_status().error(),
            Some("Failed to fetch home remedies.")
        );
        assert_eq!(*session.predict_status(), RequestStatus::Succeeded);
        assert_eq!(session.predictions().len(), 2);
    }

    #[test]
    fn test_empty_remedy_list_is_success() {
        let mut session = PredictionSession::new();
        session.select_image(sample_image());
        let generation = session.begin_submit().unwrap();
        session.resolve_submit(generation, Ok(sample_predictions()));

        let remedy_generation = session.begin_remedy().unwrap();
        session.resolve_remedy(remedy_generation, Ok(vec![]));

        assert_eq!(*session.remedy_status(), RequestStatus::Succeeded);
        assert!(session.remedies().is_empty());
    }

    #[test]
    fn test_stale_remedy_response_is_discarded() {
        let mut session = PredictionSession::new();
        session.select_image(sample_image());
        let generation = session.begin_submit().unwrap();
        session.resolve_submit(generation, Ok(sample_predictions()));
        let stale = session.begin_remedy().unwrap();

        session.clear();
        session.resolve_remedy(stale, Ok(vec!["Rest".to_string()]));

        assert!(session.remedies().is_empty());
        assert_eq!(*session.remedy_status(), RequestStatus::Idle);
    }
}
