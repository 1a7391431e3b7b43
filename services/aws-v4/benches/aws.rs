use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use cloudsign_aws_v4::{AwsHostResolver, Credential, RequestSigner};
use cloudsign_core::time::parse_iso8601;
use cloudsign_core::{Payload, SignRequest};
use std::hint::black_box;
use std::time::Duration;

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("aws_v4");

    let cred = Credential::new("access_key_id", "secret_access_key");
    let now = parse_iso8601("20240101T000000Z").expect("timestamp must be valid");

    group.bench_function("header", |b| {
        let s = RequestSigner::new("s3", "test");
        let req = http::Request::get("http://127.0.0.1:9000/hello")
            .body(Payload::Empty)
            .expect("request must be valid");

        b.iter(|| {
            let ctx = s.build_context(&req, now).expect("must success");
            s.sign_request(black_box(&req), &ctx, &cred, None)
                .expect("must success")
        })
    });

    group.bench_function("header_with_payload", |b| {
        let s = RequestSigner::new("iam", "us-east-1").with_api_version("2010-05-08");
        let req = http::Request::post("https://iam.amazonaws.com/")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Payload::from(vec![b'a'; 64 * 1024]))
            .expect("request must be valid");

        b.iter(|| {
            let ctx = s.build_context(&req, now).expect("must success");
            s.sign_request(black_box(&req), &ctx, &cred, None)
                .expect("must success")
        })
    });

    group.bench_function("presign_with_resolver", |b| {
        let s = RequestSigner::new("s3", "test").with_resolver(AwsHostResolver::new());
        let req = http::Request::get("https://bucket.s3.eu-west-1.amazonaws.com/hello?versionId=1")
            .body(Payload::Empty)
            .expect("request must be valid");

        b.iter(|| {
            let ctx = s.build_context(&req, now).expect("must success");
            s.sign_request(black_box(&req), &ctx, &cred, Some(Duration::from_secs(3600)))
                .expect("must success")
        })
    });

    group.finish();
}
