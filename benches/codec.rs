use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use cayenne_lpp::{Encoder, decode_downlink, decode_uplink};

fn sensor_board(encoder: &mut Encoder) {
    encoder
        .add_digital_input(1, 1)
        .add_analog_input(2, 3.3)
        .add_luminosity(3, 420)
        .add_temperature(4, 21.7)
        .add_relative_humidity(5, 48.5)
        .add_barometric_pressure(6, 1013.2)
        .add_accelerometer(7, 0.012, -0.981, 0.004)
        .add_gyrometer(8, 1.25, -0.5, 12.0)
        .add_gps(9, 52.3655, 4.8885, 21.54);
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let mut encoder = Encoder::with_capacity(64);
    sensor_board(&mut encoder);
    group.throughput(Throughput::Bytes(encoder.len() as u64));
    group.bench_function("encode_sensor_board", |b| {
        b.iter(|| {
            encoder.reset();
            sensor_board(&mut encoder);
            black_box(encoder.bytes());
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    let mut encoder = Encoder::new();
    sensor_board(&mut encoder);
    let uplink = encoder.freeze();
    group.throughput(Throughput::Bytes(uplink.len() as u64));
    group.bench_function("decode_uplink_sensor_board", |b| {
        b.iter(|| {
            black_box(decode_uplink(&uplink).unwrap());
        });
    });

    for channel in 0..16 {
        encoder.add_port(channel, f32::from(channel) * 1.5);
    }
    let downlink = encoder.freeze();
    group.throughput(Throughput::Bytes(downlink.len() as u64));
    group.bench_function("decode_downlink_16_ports", |b| {
        b.iter(|| {
            black_box(decode_downlink(&downlink).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
