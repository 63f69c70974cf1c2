//! 折线图组件（纯渲染层）
//!
//! 接收 (标签, 值) 序列并画成 SVG 折线。值为 None 的点是空档：
//! 折线在空档处断开，不画成 0。

use leptos::prelude::*;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 220.0;
const PADDING: f64 = 28.0;

/// 把序列切成连续的线段（空档处断开），每段转为 polyline 的点串
fn segments(values: &[(String, Option<f64>)], y_min: f64, y_max: f64) -> Vec<String> {
    let count = values.len();
    let span = (y_max - y_min).max(f64::EPSILON);
    let step = if count > 1 {
        (WIDTH - 2.0 * PADDING) / (count as f64 - 1.0)
    } else {
        0.0
    };

    let mut result = Vec::new();
    let mut current = String::new();
    for (index, (_, value)) in values.iter().enumerate() {
        match value {
            Some(v) => {
                let x = PADDING + step * index as f64;
                let clamped = v.clamp(y_min, y_max);
                let y = HEIGHT - PADDING - (clamped - y_min) / span * (HEIGHT - 2.0 * PADDING);
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&format!("{:.1},{:.1}", x, y));
            }
            None => {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        result.push(current);
    }
    result
}

/// 横轴标签：首、中、尾三个，避免拥挤
fn axis_labels(values: &[(String, Option<f64>)]) -> Vec<(f64, String)> {
    let count = values.len();
    if count == 0 {
        return Vec::new();
    }
    let step = if count > 1 {
        (WIDTH - 2.0 * PADDING) / (count as f64 - 1.0)
    } else {
        0.0
    };
    let mut indexes = vec![0];
    if count > 2 {
        indexes.push(count / 2);
    }
    if count > 1 {
        indexes.push(count - 1);
    }
    indexes
        .into_iter()
        .map(|i| (PADDING + step * i as f64, values[i].0.clone()))
        .collect()
}

/// SVG 折线图
#[component]
pub fn LineChart(
    /// 图表标题
    #[prop(into)]
    title: String,
    /// (标签, 值) 序列，None 为空档
    values: Vec<(String, Option<f64>)>,
    /// 纵轴下界
    y_min: f64,
    /// 纵轴上界
    y_max: f64,
    /// 折线颜色
    #[prop(default = "#a21caf")]
    stroke: &'static str,
) -> impl IntoView {
    let lines = segments(&values, y_min, y_max);
    let labels = axis_labels(&values);
    let view_box = format!("0 0 {} {}", WIDTH, HEIGHT);

    view! {
        <div class="bg-card border rounded-2xl shadow-xl p-6">
            <h2 class="text-2xl font-bold mb-4 text-card-foreground">{title}</h2>
            <svg viewBox=view_box class="w-full" preserveAspectRatio="none">
                // 上下边界参考线
                <line
                    x1=PADDING
                    y1={HEIGHT - PADDING}
                    x2={WIDTH - PADDING}
                    y2={HEIGHT - PADDING}
                    stroke="#e0e0e0"
                    stroke-dasharray="3 3"
                />
                <line
                    x1=PADDING
                    y1=PADDING
                    x2={WIDTH - PADDING}
                    y2=PADDING
                    stroke="#e0e0e0"
                    stroke-dasharray="3 3"
                />
                {lines
                    .into_iter()
                    .map(|points| {
                        view! {
                            <polyline
                                points=points
                                fill="none"
                                stroke=stroke
                                stroke-width="3"
                                stroke-linecap="round"
                            />
                        }
                    })
                    .collect_view()}
                {labels
                    .into_iter()
                    .map(|(x, text)| {
                        view! {
                            <text
                                x=x
                                y={HEIGHT - 6.0}
                                font-size="11"
                                text-anchor="middle"
                                fill="#6366f1"
                            >
                                {text}
                            </text>
                        }
                    })
                    .collect_view()}
            </svg>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(label: &str, v: Option<f64>) -> (String, Option<f64>) {
        (label.to_string(), v)
    }

    #[test]
    fn test_gap_splits_polyline() {
        let values = vec![
            value("a", Some(5.0)),
            value("b", None),
            value("c", Some(7.0)),
            value("d", Some(8.0)),
        ];
        let lines = segments(&values, 1.0, 10.0);
        // 空档把折线断成两段：单点段和两点段
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split(' ').count(), 1);
        assert_eq!(lines[1].split(' ').count(), 2);
    }

    #[test]
    fn test_no_values_no_lines() {
        let values = vec![value("a", None), value("b", None)];
        assert!(segments(&values, 1.0, 10.0).is_empty());
        assert_eq!(segments(&[], 1.0, 10.0).len(), 0);
    }

    #[test]
    fn test_values_clamped_into_domain() {
        let values = vec![value("a", Some(99.0))];
        let lines = segments(&values, 1.0, 10.0);
        let (_, y) = lines[0].split_once(',').unwrap();
        // 超界的值被夹到上界，对应纵坐标等于上边界线
        assert_eq!(y.parse::<f64>().unwrap(), PADDING);
    }

    #[test]
    fn test_axis_labels_first_middle_last() {
        let values: Vec<_> = (0..5).map(|i| value(&format!("d{}", i), Some(5.0))).collect();
        let labels = axis_labels(&values);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0].1, "d0");
        assert_eq!(labels[1].1, "d2");
        assert_eq!(labels[2].1, "d4");
    }
}
