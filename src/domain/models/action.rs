pub enum Action {
    Clear(),
    Export(),
    ListModels(),
    SelectModel(String),
    SelectPersona(String),
    SetMaxTokens(u32),
    SetTemperature(f32),
    Submit(String),
}
