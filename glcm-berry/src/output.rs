//! 特征序列化.
//!
//! 计算核心只负责产出 `(特征名, 特征值)` 记录, 文件与路径管理
//! 由这里的接收器完成. CSV 行格式与参考流水线保持一致:
//! `glcmFeatures3DWmrg,<特征名>,<特征值>`.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::consts::csv;
use crate::FeatureVector;

/// 特征接收器: 逐条接收 `(特征名, 特征值)` 记录.
///
/// 计算核心通过该接口与序列化侧协作, 自身不打开文件.
pub trait FeatureSink {
    /// 追加一条记录.
    fn append(&mut self, name: &str, value: f64) -> io::Result<()>;
}

/// 写出 CSV 行的接收器. 每条记录一行, 三列:
/// 特征族名, 特征名, 特征值.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    out: W,
}

impl<W: Write> CsvSink<W> {
    /// 在任意 `Write` 之上构建接收器. 测试与管道输出时很有用.
    #[inline]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// 结束写入, 交还底层 writer. 其间执行一次 flush.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl CsvSink<BufWriter<File>> {
    /// 在 `dir` 下新建独立输出文件 `glcmFeatures3DWmrg.csv`.
    /// 已存在的同名文件会被截断.
    pub fn create_in<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let file = File::create(dir.as_ref().join(csv::GLCM_3D_MERGED))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// 以追加模式打开 `dir` 下的共享汇总文件 `radiomicsFeatures.csv`.
    /// 文件不存在时自动创建.
    pub fn append_shared<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.as_ref().join(csv::RADIOMICS_SHARED))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FeatureSink for CsvSink<W> {
    fn append(&mut self, name: &str, value: f64) -> io::Result<()> {
        writeln!(self.out, "{},{},{}", csv::GROUP, name, value)
    }
}

/// 将特征向量的全部记录按固定顺序写入接收器.
pub fn write_features<S: FeatureSink>(sink: &mut S, features: &FeatureVector) -> io::Result<()> {
    for (name, value) in features.iter() {
        sink.append(name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_features, CsvSink, FeatureSink};
    use crate::consts::GLCM_FEATURE_COUNT;
    use crate::FeatureVector;

    #[test]
    fn test_csv_line_format() {
        let mut sink = CsvSink::new(Vec::new());
        sink.append("joint maximum", 0.5).unwrap();
        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        assert_eq!(out, "glcmFeatures3DWmrg,joint maximum,0.5\n");
    }

    #[test]
    fn test_write_all_features() {
        let fv = FeatureVector::from_probabilities(&ndarray::array![[0.0, 0.5], [0.5, 0.0]]);
        let mut sink = CsvSink::new(Vec::new());
        write_features(&mut sink, &fv).unwrap();

        let out = String::from_utf8(sink.finish().unwrap()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), GLCM_FEATURE_COUNT);
        assert!(lines[0].starts_with("glcmFeatures3DWmrg,joint maximum,"));
        assert!(lines
            .last()
            .unwrap()
            .starts_with("glcmFeatures3DWmrg,second measure of information correlation,"));

        // 每行三列.
        for line in lines {
            assert_eq!(line.split(',').count(), 3);
        }
    }
}
