//! Integration test: full conversion into a real NetCDF file and back.

use std::io::Cursor;
use std::path::Path;

use bin2nc_convert::{
    define_dataset, fill_variables, synthesize_coordinates, ConvertError, NetcdfSink,
};
use bin2nc_fortran::{Precision, RecordStream};
use bin2nc_schema::Schema;

const DESCRIPTOR: &str = "\
dimensions:
  lat: 2
  lon: 3
  lev: 2
  time: 1
variables:
  - {short_name: ps, long_name: surface_pressure, units: Pa, dimension: [lat, lon]}
  - {short_name: t, long_name: temperature, units: K, dimension: [lev, lat, lon]}
";

fn f32_record(values: &[f32]) -> Vec<u8> {
    let payload: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    let marker = (payload.len() as i32).to_le_bytes();
    let mut out = Vec::new();
    out.extend_from_slice(&marker);
    out.extend_from_slice(&payload);
    out.extend_from_slice(&marker);
    out
}

fn convert_to(path: &Path) {
    let schema = Schema::from_yaml(DESCRIPTOR).expect("valid descriptor");
    let mut sink = NetcdfSink::create(path).expect("create output");
    define_dataset(&schema, &mut sink).expect("define dataset");
    synthesize_coordinates(&schema.dimensions, &mut sink).expect("coordinates");

    // ps: one 2x3 record; t: one 2x3 plane per level.
    let mut bytes = f32_record(&[101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
    bytes.extend(f32_record(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
    bytes.extend(f32_record(&[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]));
    let stream = RecordStream::new(Cursor::new(bytes), Precision::Float);
    fill_variables(stream, &schema, &mut sink).expect("fill");
}

#[test]
fn round_trip_through_netcdf() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("restart.nc");
    convert_to(&path);

    let file = netcdf::open(&path).expect("open output");

    // Coordinates: index sequences, zeros for time.
    let lat = file.variable("lat").expect("lat exists");
    assert_eq!(lat.get_values::<f64, _>(..).unwrap(), vec![1.0, 2.0]);
    let lon = file.variable("lon").expect("lon exists");
    assert_eq!(lon.get_values::<f64, _>(..).unwrap(), vec![1.0, 2.0, 3.0]);
    let lev = file.variable("lev").expect("lev exists");
    assert_eq!(lev.get_values::<f64, _>(..).unwrap(), vec![1.0, 2.0]);
    let time = file.variable("time").expect("time exists");
    assert_eq!(time.get_values::<f64, _>(..).unwrap(), vec![0.0]);

    // Data lands in declared axis order.
    let ps = file.variable("ps").expect("ps exists");
    assert_eq!(
        ps.get_values::<f32, _>(..).unwrap(),
        vec![101.0, 102.0, 103.0, 104.0, 105.0, 106.0]
    );
    let t = file.variable("t").expect("t exists");
    let values = t.get_values::<f32, _>(..).unwrap();
    assert_eq!(values.len(), 12);
    assert_eq!(&values[..6], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(&values[6..], &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);

    // Attributes copied verbatim from the descriptor.
    let units: String = ps
        .attribute_value("units")
        .expect("units present")
        .expect("readable")
        .try_into()
        .expect("string attribute");
    assert_eq!(units, "Pa");
    let long_name: String = t
        .attribute_value("long_name")
        .expect("long_name present")
        .expect("readable")
        .try_into()
        .expect("string attribute");
    assert_eq!(long_name, "temperature");

    // Hybrid-sigma metadata on the level axis.
    let formula: String = lev
        .attribute_value("formulaTerms")
        .expect("formulaTerms present")
        .expect("readable")
        .try_into()
        .expect("string attribute");
    assert_eq!(formula, "ap: ak b: bk ps: ps p0: p00");
}

#[test]
fn refuses_to_overwrite_existing_output() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("restart.nc");
    std::fs::write(&path, b"not a netcdf file").expect("seed file");

    let err = NetcdfSink::create(&path).unwrap_err();
    assert!(matches!(err, ConvertError::OutputExists { .. }));
}
