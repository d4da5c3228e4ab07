//! 院区聚合根。
//!
//! 院区独占其区域、RFID 读写器与摄像头：子实体只能经由本聚合创建、
//! 修改与删除，以便集中维护空间不变量：
//! - 所有安装坐标位于 `[0, dimensoes.x] × [0, dimensoes.y]` 内
//! - 新建区域不得与现有区域重叠（边界接触也算重叠）
//! - 子实体只通过 `patio_id` / `zona_patio_id` 外键回指，不持有对象引用
//!
//! 区域创建时的重叠检查是“先查后写”，在单个 `&mut Patio` 内完成；
//! 跨进程的并发创建需要由存储层提供唯一性保证。

use crate::camera::Camera;
use crate::coordenada::Coordenada;
use crate::error::{DomainError, DomainResult, ensure_not_blank};
use crate::localizacao::LocalizacaoMoto;
use crate::moto::MotoStatus;
use crate::now_epoch_ms;
use crate::sensor::SensorRfid;
use crate::zona::{TipoZona, ZonaPatio};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// 院区基础信息。
#[derive(Debug, Clone, PartialEq)]
pub struct EnderecoPatio {
    pub endereco: String,
    pub cidade: String,
    pub estado: String,
    pub pais: String,
}

/// 院区聚合根。
///
/// 子实体 id 由调用方（存储层）分配并保证全局唯一，聚合只拒绝院区内重复。
#[derive(Debug, Clone)]
pub struct Patio {
    id: i64,
    nome: String,
    endereco: EnderecoPatio,
    dimensoes: Coordenada,
    planta_baixa: Option<String>,
    zonas: BTreeMap<i64, ZonaPatio>,
    /// 区域 id 的创建顺序。
    ordem_zonas: Vec<i64>,
    sensores: BTreeMap<i64, SensorRfid>,
    cameras: BTreeMap<i64, Camera>,
    localizacoes: Vec<LocalizacaoMoto>,
}

impl Patio {
    /// 创建院区；名称不能为空，宽高必须为正。
    pub fn new(
        id: i64,
        nome: impl Into<String>,
        endereco: EnderecoPatio,
        dimensoes: Coordenada,
        planta_baixa: Option<String>,
    ) -> DomainResult<Self> {
        let nome = nome.into();
        ensure_not_blank("nome", &nome)?;
        if dimensoes.x() <= 0.0 || dimensoes.y() <= 0.0 {
            return Err(DomainError::validation(format!(
                "dimensoes must be positive, got {dimensoes}"
            )));
        }
        Ok(Self {
            id,
            nome,
            endereco,
            dimensoes,
            planta_baixa,
            zonas: BTreeMap::new(),
            ordem_zonas: Vec::new(),
            sensores: BTreeMap::new(),
            cameras: BTreeMap::new(),
            localizacoes: Vec::new(),
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn endereco(&self) -> &EnderecoPatio {
        &self.endereco
    }

    pub fn dimensoes(&self) -> Coordenada {
        self.dimensoes
    }

    pub fn planta_baixa(&self) -> Option<&str> {
        self.planta_baixa.as_deref()
    }

    /// 区域（按 id 升序，即创建顺序）。
    /// 按创建顺序遍历区域。
    pub fn zonas(&self) -> impl Iterator<Item = &ZonaPatio> {
        self.ordem_zonas
            .iter()
            .filter_map(|zona_id| self.zonas.get(zona_id))
    }

    pub fn sensores(&self) -> impl Iterator<Item = &SensorRfid> {
        self.sensores.values()
    }

    pub fn cameras(&self) -> impl Iterator<Item = &Camera> {
        self.cameras.values()
    }

    pub fn localizacoes(&self) -> &[LocalizacaoMoto] {
        &self.localizacoes
    }

    pub fn zona(&self, zona_id: i64) -> Option<&ZonaPatio> {
        self.zonas.get(&zona_id)
    }

    pub fn sensor(&self, sensor_id: i64) -> Option<&SensorRfid> {
        self.sensores.get(&sensor_id)
    }

    pub fn camera(&self, camera_id: i64) -> Option<&Camera> {
        self.cameras.get(&camera_id)
    }

    /// 坐标是否位于院区边界内（含边界）。
    pub fn coordenada_esta_valida(&self, coordenada: &Coordenada) -> bool {
        coordenada.esta_dentro_do_retangulo(&Coordenada::origem(), &self.dimensoes)
    }

    fn ensure_dentro_dos_limites(&self, campo: &str, coordenada: &Coordenada) -> DomainResult<()> {
        if !self.coordenada_esta_valida(coordenada) {
            return Err(DomainError::validation(format!(
                "{campo} {coordenada} fora dos limites do patio {} {}",
                self.id, self.dimensoes
            )));
        }
        Ok(())
    }

    /// 创建区域。
    ///
    /// 两个角点都必须位于院区内；与任何现有区域重叠返回 Conflict。
    pub fn criar_zona(
        &mut self,
        zona_id: i64,
        nome: impl Into<String>,
        tipo_zona: TipoZona,
        ponto_inicial: Coordenada,
        ponto_final: Coordenada,
        cor: impl Into<String>,
    ) -> DomainResult<&ZonaPatio> {
        self.ensure_dentro_dos_limites("ponto_inicial", &ponto_inicial)?;
        self.ensure_dentro_dos_limites("ponto_final", &ponto_final)?;
        ensure_id_livre("zona", zona_id, &self.zonas)?;
        let zona = ZonaPatio::new(
            zona_id,
            self.id,
            nome,
            tipo_zona,
            ponto_inicial,
            ponto_final,
            cor,
        )?;
        if let Some(existente) = self
            .zonas
            .values()
            .find(|existente| existente.tem_sobreposicao_com_zona(&zona))
        {
            return Err(DomainError::conflict(format!(
                "zona sobrepoe a zona existente {} ({})",
                existente.id(),
                existente.nome()
            )));
        }
        self.ordem_zonas.push(zona_id);
        Ok(self.zonas.entry(zona_id).or_insert(zona))
    }

    /// 调整区域角点（不做边界与重叠复检）。
    pub fn redimensionar_zona(
        &mut self,
        zona_id: i64,
        novo_inicio: Coordenada,
        novo_fim: Coordenada,
    ) -> DomainResult<()> {
        self.zona_mut(zona_id)?
            .redimensionar_zona(novo_inicio, novo_fim);
        Ok(())
    }

    pub fn alterar_cor_zona(&mut self, zona_id: i64, nova_cor: impl Into<String>) -> DomainResult<()> {
        self.zona_mut(zona_id)?.alterar_cor(nova_cor)
    }

    /// 删除区域。
    ///
    /// 仍有激活读写器引用时返回 FailedPrecondition；未激活的读写器随区域一并移除。
    pub fn remover_zona(&mut self, zona_id: i64) -> DomainResult<ZonaPatio> {
        if !self.zonas.contains_key(&zona_id) {
            return Err(zona_nao_encontrada(zona_id));
        }
        if let Some(sensor) = self
            .sensores
            .values()
            .find(|sensor| sensor.zona_patio_id() == zona_id && sensor.ativo())
        {
            return Err(DomainError::failed_precondition(format!(
                "zona {zona_id} possui sensor ativo {}",
                sensor.id()
            )));
        }
        self.sensores
            .retain(|_, sensor| sensor.zona_patio_id() != zona_id);
        self.ordem_zonas.retain(|id| *id != zona_id);
        self.zonas
            .remove(&zona_id)
            .ok_or_else(|| zona_nao_encontrada(zona_id))
    }

    fn zona_mut(&mut self, zona_id: i64) -> DomainResult<&mut ZonaPatio> {
        self.zonas
            .get_mut(&zona_id)
            .ok_or_else(|| zona_nao_encontrada(zona_id))
    }

    /// 在指定区域安装 RFID 读写器（默认激活）。
    pub fn instalar_sensor_rfid(
        &mut self,
        sensor_id: i64,
        zona_id: i64,
        posicao_label: impl Into<String>,
        posicao: Coordenada,
        altura: f64,
        angulo_visao: f64,
    ) -> DomainResult<&SensorRfid> {
        self.ensure_dentro_dos_limites("posicao", &posicao)?;
        if !self.zonas.contains_key(&zona_id) {
            return Err(zona_nao_encontrada(zona_id));
        }
        ensure_id_livre("sensor", sensor_id, &self.sensores)?;
        let sensor = SensorRfid::new(
            sensor_id,
            zona_id,
            self.id,
            posicao_label,
            posicao,
            altura,
            angulo_visao,
            now_epoch_ms(),
        )?;
        Ok(self.sensores.entry(sensor_id).or_insert(sensor))
    }

    pub fn ativar_sensor(&mut self, sensor_id: i64) -> DomainResult<()> {
        self.sensor_mut(sensor_id)?.ativar_sensor()
    }

    pub fn desativar_sensor(&mut self, sensor_id: i64) -> DomainResult<()> {
        self.sensor_mut(sensor_id)?.desativar_sensor()
    }

    pub fn registrar_leitura_sensor(&mut self, sensor_id: i64, ts_ms: i64) -> DomainResult<()> {
        self.sensor_mut(sensor_id)?.registrar_leitura_em(ts_ms)
    }

    /// 移动读写器；新位置同样受院区边界约束。
    pub fn reposicionar_sensor(
        &mut self,
        sensor_id: i64,
        nova_posicao: Coordenada,
        nova_altura: Option<f64>,
    ) -> DomainResult<()> {
        self.ensure_dentro_dos_limites("posicao", &nova_posicao)?;
        self.sensor_mut(sensor_id)?
            .atualizar_posicao(nova_posicao, nova_altura);
        Ok(())
    }

    pub fn remover_sensor(&mut self, sensor_id: i64) -> DomainResult<SensorRfid> {
        self.sensores
            .remove(&sensor_id)
            .ok_or_else(|| sensor_nao_encontrado(sensor_id))
    }

    fn sensor_mut(&mut self, sensor_id: i64) -> DomainResult<&mut SensorRfid> {
        self.sensores
            .get_mut(&sensor_id)
            .ok_or_else(|| sensor_nao_encontrado(sensor_id))
    }

    pub fn sensores_da_zona(&self, zona_id: i64) -> Vec<&SensorRfid> {
        self.sensores
            .values()
            .filter(|sensor| sensor.zona_patio_id() == zona_id)
            .collect()
    }

    /// 超过阈值未上报读取的激活读写器。
    pub fn sensores_com_problema_em(&self, limiar: Duration, agora_ms: i64) -> Vec<&SensorRfid> {
        self.sensores
            .values()
            .filter(|sensor| sensor.esta_com_problema_em(limiar, agora_ms))
            .collect()
    }

    pub fn adicionar_camera(
        &mut self,
        camera_id: i64,
        nome: impl Into<String>,
        posicao: Coordenada,
        altura: f64,
        angulo_visao: f64,
        url_stream: Option<String>,
    ) -> DomainResult<&Camera> {
        self.ensure_dentro_dos_limites("posicao", &posicao)?;
        ensure_id_livre("camera", camera_id, &self.cameras)?;
        let camera = Camera::new(
            camera_id,
            self.id,
            nome,
            posicao,
            altura,
            angulo_visao,
            url_stream,
        )?;
        Ok(self.cameras.entry(camera_id).or_insert(camera))
    }

    pub fn remover_camera(&mut self, camera_id: i64) -> DomainResult<Camera> {
        self.cameras
            .remove(&camera_id)
            .ok_or_else(|| DomainError::not_found(format!("camera {camera_id} nao encontrada")))
    }

    /// 距离不超过 `raio` 的摄像头（线性扫描）。
    pub fn obter_cameras_proximas_de(&self, posicao: &Coordenada, raio: f64) -> Vec<&Camera> {
        self.cameras
            .values()
            .filter(|camera| camera.distancia_para(posicao) <= raio)
            .collect()
    }

    /// 第一个（按创建顺序）包含该点的区域。
    pub fn obter_zona_por_posicao(&self, posicao: &Coordenada) -> Option<&ZonaPatio> {
        self.zonas().find(|zona| zona.contem_posicao(posicao))
    }

    /// 追加一条位置记录到内存历史。
    pub fn registrar_localizacao(&mut self, localizacao: LocalizacaoMoto) -> DomainResult<()> {
        if localizacao.patio_id() != self.id {
            return Err(DomainError::failed_precondition(format!(
                "localizacao {} pertence ao patio {}, nao ao patio {}",
                localizacao.id(),
                localizacao.patio_id(),
                self.id
            )));
        }
        self.localizacoes.push(localizacao);
        Ok(())
    }

    /// 每辆车最新的位置记录；时间戳相同时后写入者优先。
    fn ultimas_localizacoes(&self) -> HashMap<i64, &LocalizacaoMoto> {
        let mut ultimas: HashMap<i64, &LocalizacaoMoto> = HashMap::new();
        for localizacao in &self.localizacoes {
            let substituir = ultimas
                .get(&localizacao.moto_id())
                .map(|atual| localizacao.timestamp_ms() >= atual.timestamp_ms())
                .unwrap_or(true);
            if substituir {
                ultimas.insert(localizacao.moto_id(), localizacao);
            }
        }
        ultimas
    }

    /// 最新状态为 DISPONIVEL 的不同车辆数。
    pub fn obter_total_motos_disponiveis(&self) -> usize {
        self.ultimas_localizacoes()
            .values()
            .filter(|localizacao| localizacao.status() == MotoStatus::Disponivel)
            .count()
    }

    /// 最新位置落在停车区内的不同车辆数。
    pub fn obter_total_motos_estacionadas(&self) -> usize {
        let estacionamentos: Vec<&ZonaPatio> = self.zonas_de_estacionamento().collect();
        self.ultimas_localizacoes()
            .values()
            .filter(|localizacao| {
                estacionamentos
                    .iter()
                    .any(|zona| zona.contem_posicao(&localizacao.posicao()))
            })
            .count()
    }

    fn zonas_de_estacionamento(&self) -> impl Iterator<Item = &ZonaPatio> {
        self.zonas
            .values()
            .filter(|zona| *zona.tipo_zona() == TipoZona::Estacionamento)
    }

    /// 占用率 = 停放车辆数 / 停车区数量；没有停车区时为 0。
    pub fn calcular_taxa_ocupacao(&self) -> f64 {
        let total_zonas = self.zonas_de_estacionamento().count();
        if total_zonas == 0 {
            return 0.0;
        }
        self.obter_total_motos_estacionadas() as f64 / total_zonas as f64
    }

    /// 仍拥有区域、读写器或摄像头时不可删除。
    pub fn garantir_remocao_permitida(&self) -> DomainResult<()> {
        if !self.zonas.is_empty() || !self.sensores.is_empty() || !self.cameras.is_empty() {
            return Err(DomainError::failed_precondition(format!(
                "patio {} possui {} zonas, {} sensores e {} cameras",
                self.id,
                self.zonas.len(),
                self.sensores.len(),
                self.cameras.len()
            )));
        }
        Ok(())
    }
}

fn ensure_id_livre<T>(entidade: &str, id: i64, map: &BTreeMap<i64, T>) -> DomainResult<()> {
    if map.contains_key(&id) {
        return Err(DomainError::conflict(format!("{entidade} {id} ja existe")));
    }
    Ok(())
}

fn zona_nao_encontrada(zona_id: i64) -> DomainError {
    DomainError::not_found(format!("zona {zona_id} nao encontrada"))
}

fn sensor_nao_encontrado(sensor_id: i64) -> DomainError {
    DomainError::not_found(format!("sensor {sensor_id} nao encontrado"))
}

impl EnderecoPatio {
    pub fn new(
        endereco: impl Into<String>,
        cidade: impl Into<String>,
        estado: impl Into<String>,
        pais: impl Into<String>,
    ) -> DomainResult<Self> {
        let endereco = Self {
            endereco: endereco.into(),
            cidade: cidade.into(),
            estado: estado.into(),
            pais: pais.into(),
        };
        ensure_not_blank("endereco", &endereco.endereco)?;
        ensure_not_blank("cidade", &endereco.cidade)?;
        Ok(endereco)
    }
}
