//! 3D 合并 GLCM 特征提取入口.
//!
//! 从 npy 文件读入已量化的体数据 (ROI 之外为 NaN), 计算 13 方向平均的
//! GLCM 特征, 并写出 CSV.

use std::env;
use std::path::PathBuf;

use glcm_berry::consts::csv;
use glcm_berry::output::{write_features, CsvSink};
use glcm_berry::GreyVolume;
use ndarray::Array3;
use ndarray_npy::read_npy;

/// 获取量化体数据 npy 文件路径.
///
/// 1. 若环境变量 `$GLCM_VOLUME_NPY` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/volume.npy`.
fn volume_path_from_env_or_home() -> PathBuf {
    if let Ok(p) = env::var("GLCM_VOLUME_NPY") {
        PathBuf::from(p)
    } else {
        let mut home = dirs::home_dir().expect("无法定位 home 目录");
        home.extend(["dataset", "volume.npy"]);
        home
    }
}

/// 获取 CSV 输出目录. 取 `$GLCM_OUTPUT_DIR`, 默认当前目录.
fn output_dir_from_env() -> PathBuf {
    env::var("GLCM_OUTPUT_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

fn main() {
    let path = volume_path_from_env_or_home();
    assert!(path.is_file(), "找不到体数据文件: {}", path.display());

    let data: Array3<f32> = read_npy(&path).expect("npy 读取失败");
    let volume = GreyVolume::from_array(data);

    // 灰度级个数 G 优先取环境变量 (量化阶段的真值), 否则从数据推导.
    let levels = match env::var("GLCM_MAX_GREY") {
        Ok(v) => v.parse().expect("$GLCM_MAX_GREY 不是合法正整数"),
        Err(_) => volume
            .max_grey_level()
            .expect("体数据没有任何 ROI 体素, 无法推导灰度级个数"),
    };
    println!("volume: {:?}, G = {levels}", volume.shape());

    let features = glcm_berry::par_merged_features_3d(&volume, levels).expect("特征计算失败");

    let out_dir = output_dir_from_env();
    let mut sink = CsvSink::create_in(&out_dir).expect("CSV 文件创建失败");
    write_features(&mut sink, &features).expect("CSV 写入失败");
    sink.finish().expect("CSV 落盘失败");

    println!("done: {}", out_dir.join(csv::GLCM_3D_MERGED).display());
}
