//! 카운트 벡터 -- 규칙별 매칭 횟수를 한 번의 순회로 계산합니다.

use serde::Serialize;

use logwarden_core::types::LogValidation;

use crate::matcher;

/// 규칙 인덱스별 관측 매칭 횟수
///
/// `counts[i]`는 규칙 `i`에 매칭되는 메시지 수와 같습니다.
/// 검증 호출마다 새로 계산되며 호출이 끝나면 버려집니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountVector {
    /// 규칙별 매칭 횟수 (규칙 선언 순서)
    counts: Vec<u64>,
    /// 규칙별로 횟수가 처음 `max`를 넘은 메시지 위치
    #[serde(skip)]
    exceeded_at: Vec<Option<usize>>,
}

impl CountVector {
    /// 모든 메시지를 모든 규칙에 대해 평가하여 카운트 벡터를 만듭니다.
    pub fn tally<S: AsRef<str>>(rules: &[LogValidation], messages: &[S]) -> Self {
        let init = Self {
            counts: vec![0; rules.len()],
            exceeded_at: vec![None; rules.len()],
        };

        messages
            .iter()
            .enumerate()
            .fold(init, |mut acc, (position, message)| {
                for (idx, rule) in rules.iter().enumerate() {
                    if !matcher::matches(message.as_ref(), rule) {
                        continue;
                    }
                    acc.counts[idx] += 1;
                    if acc.counts[idx] > rule.max && acc.exceeded_at[idx].is_none() {
                        acc.exceeded_at[idx] = Some(position);
                    }
                }
                acc
            })
    }

    /// 규칙 `index`의 매칭 횟수를 반환합니다.
    pub fn get(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// 규칙별 매칭 횟수 슬라이스를 반환합니다.
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    /// 규칙 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// 규칙이 하나도 없으면 true를 반환합니다.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 전체 매칭 수의 합을 반환합니다.
    pub fn total_matches(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// 규칙 `index`가 처음 한도를 넘은 메시지 위치를 반환합니다.
    pub fn exceeded_at(&self, index: usize) -> Option<usize> {
        self.exceeded_at.get(index).copied().flatten()
    }
}
