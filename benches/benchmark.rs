//! パフォーマンスベンチマーク
//!
//! テストケース木の展開と、ワークブック生成の処理時間を測定します。
//!
//! 実装するベンチマーク:
//! - 展開のみ（グリッド構築）
//! - ワークブック生成（xlsxバイト列まで）

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tcxlsx::{Case, Document, ExporterBuilder, Field, Group, Node, Suite};

/// 指定数のスイートを持つドキュメントを生成
///
/// 各スイートは2階層のグループと、その下に10件ずつのケースを持ちます。
fn generate_document(sheet_name: &str, suites: usize) -> Document {
    let mut document = Document::new(sheet_name);
    for s in 0..suites {
        let groups = (0..5)
            .map(|g| {
                let cases = (0..10)
                    .map(|c| {
                        Node::Case(
                            Case::new()
                                .with(Field::Description, format!("case {}-{}-{}", s, g, c))
                                .with(Field::Procedure, "手順を実行する")
                                .with(Field::ExpectedValue, "期待通りに動作する")
                                .with(Field::Category, "正常系"),
                        )
                    })
                    .collect();
                Node::Group(Group::new(format!("group {}", g), cases))
            })
            .collect();
        document = document.with_suite(Suite::new(format!("suite {}", s), groups));
    }
    document
}

fn benchmark_flatten(c: &mut Criterion) {
    let exporter = ExporterBuilder::new().build().unwrap();
    let documents = vec![generate_document("Bench", 100)];
    let cases = documents[0].case_count() as u64;

    let mut group = c.benchmark_group("flatten");
    group.throughput(Throughput::Elements(cases));

    group.bench_function("build_grids_5000_cases", |b| {
        b.iter(|| black_box(exporter.build_grids(black_box(&documents)).unwrap()));
    });

    group.finish();
}

fn benchmark_workbook(c: &mut Criterion) {
    let exporter = ExporterBuilder::new().build().unwrap();
    let documents: Vec<Document> = (0..5)
        .map(|i| generate_document(&format!("Sheet{}", i), 20))
        .collect();

    let mut group = c.benchmark_group("workbook");
    group.sample_size(10); // xlsx生成は時間がかかるため、10回のサンプル

    group.bench_function("to_buffer_5_sheets", |b| {
        b.iter(|| black_box(exporter.to_buffer(black_box(&documents)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, benchmark_flatten, benchmark_workbook);
criterion_main!(benches);
